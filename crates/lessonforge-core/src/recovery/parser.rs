//! Recovery parsing of generator responses
//!
//! Tries a fixed sequence of strategies against the raw text and returns
//! the first success. Failure is an ordinary outcome, represented as data;
//! nothing in this module panics or returns a partial value.

use serde_json::Value;

/// Outcome of a recovery parse
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A structured value was recovered
    Success(Value),
    /// No strategy produced a valid value; carries the reason
    Failure(String),
}

impl ParseOutcome {
    /// True if a value was recovered
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True if every strategy failed
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the recovered value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Consume the outcome, yielding the recovered value
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure reason, if every strategy failed
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// Recover a structured value from raw generator text
///
/// Strategies are tried in order; the first success wins:
/// 1. direct parse of the trimmed text
/// 2. fenced code block containing an object/array span
/// 3. widest `{...}` slice (first `{` to last `}`)
/// 4. largest independently-parseable `{...}` span anywhere in the text
/// 5. repair pass (strip comments and trailing commas), then direct parse
/// 6. widest `[...]` slice, for responses whose payload is a bare array
///
/// The array fallback ranks last: object payloads routinely contain
/// arrays, and picking an embedded list over the surrounding record would
/// silently drop most of the payload.
pub fn parse(text: &str) -> ParseOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Failure("response is empty".to_string());
    }

    let strategies: [fn(&str) -> Option<Value>; 6] = [
        parse_direct,
        parse_fenced_block,
        parse_widest_object,
        parse_largest_object,
        parse_repaired,
        parse_widest_array,
    ];

    for strategy in strategies {
        if let Some(value) = strategy(trimmed) {
            return ParseOutcome::Success(value);
        }
    }

    ParseOutcome::Failure(
        "no valid JSON structure could be recovered from the response".to_string(),
    )
}

/// Collect every independently-parseable object or array in the text
///
/// Scans left to right for balanced `{...}` and `[...]` spans, keeps the
/// ones that parse, and skips past each accepted span so nested values are
/// not returned twice. Used when a single response may legitimately carry
/// multiple payloads.
pub fn extract_all(text: &str) -> Vec<Value> {
    scan_parseable_spans(text, &['{', '['])
        .into_iter()
        .map(|(_, value)| value)
        .collect()
}

// ---------- strategies ----------

/// Strategy 1: the whole (trimmed) text is a valid value
fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// Strategy 2: a fenced code block (with or without a language tag)
/// containing an object or array span
fn parse_fenced_block(text: &str) -> Option<Value> {
    for block in fenced_blocks(text) {
        if let Some(value) = parse_widest_object(&block).or_else(|| parse_widest_array(&block)) {
            return Some(value);
        }
    }
    None
}

/// Strategy 3: the widest plausible object slice, first `{` to last `}`
fn parse_widest_object(text: &str) -> Option<Value> {
    widest_slice(text, '{', '}')
}

/// Strategy 4: every balanced `{...}` span that parses, largest wins
///
/// Guards against the generator echoing a small example object before the
/// real payload.
fn parse_largest_object(text: &str) -> Option<Value> {
    scan_parseable_spans(text, &['{'])
        .into_iter()
        .max_by_key(|(len, _)| *len)
        .map(|(_, value)| value)
}

/// Strategy 5: strip `//` and `/*...*/` comments and trailing commas,
/// then retry a direct parse
fn parse_repaired(text: &str) -> Option<Value> {
    let repaired = strip_trailing_commas(&strip_comments(text));
    serde_json::from_str(repaired.trim()).ok()
}

/// Strategy 6: the widest array slice, first `[` to last `]`
fn parse_widest_array(text: &str) -> Option<Value> {
    widest_slice(text, '[', ']')
}

// ---------- scanning helpers ----------

/// Bodies of all fenced code blocks, in order of appearance
fn fenced_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut in_block = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            if in_block {
                blocks.push(std::mem::take(&mut current));
                in_block = false;
            } else {
                // opening fence; the language tag (if any) stays on this line
                in_block = true;
            }
        } else if in_block {
            current.push_str(line);
            current.push('\n');
        }
    }
    // An unterminated fence still yields its body; truncated generator
    // output often ends mid-block.
    if in_block && !current.trim().is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse the slice from the first `open` to the last `close` in the text
fn widest_slice(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Scan for balanced spans opening with any of `opens`, keeping only the
/// ones serde accepts. Returns `(span_char_length, value)` pairs in order
/// of appearance; the scan resumes after each accepted span.
fn scan_parseable_spans(text: &str, opens: &[char]) -> Vec<(usize, Value)> {
    let mut found = Vec::new();
    let mut index = 0;

    while index < text.len() {
        let rest = &text[index..];
        let Some(offset) = rest.find(|c| opens.contains(&c)) else {
            break;
        };
        let span_start = index + offset;
        match balanced_span_at(text, span_start) {
            Some(span) => match serde_json::from_str::<Value>(span) {
                Ok(value) => {
                    found.push((span.len(), value));
                    index = span_start + span.len();
                }
                Err(_) => index = span_start + 1,
            },
            None => index = span_start + 1,
        }
    }

    found
}

/// Extract the balanced span starting at `start` (which must sit on an
/// opening brace or bracket). String literals are honoured: a closing
/// brace inside a JSON string does not terminate the span.
fn balanced_span_at(text: &str, start: usize) -> Option<&str> {
    let mut chars = text[start..].char_indices();
    let (_, open) = chars.next()?;
    let close = match open {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in chars {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

// ---------- repair helpers ----------

/// Remove `//` line comments and `/*...*/` block comments outside strings
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Remove commas that directly precede a closing brace or bracket
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next_significant = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next_significant, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}
