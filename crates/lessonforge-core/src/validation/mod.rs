//! Domain validation of recovered candidate values
//!
//! Validators take an untyped candidate value (fresh out of recovery) and
//! report findings on two parallel lists: errors block persistence,
//! warnings flag content for human review and never block. A result is
//! valid exactly when its error list is empty; validity is derived, so no
//! code path can produce a "valid" result that still carries errors.

mod activity;
mod curriculum;
mod lesson_plan;
mod slide_deck;

pub use activity::ActivityValidator;
pub use curriculum::{extract_codes, CurriculumCatalog};
pub use lesson_plan::LessonPlanValidator;
pub use slide_deck::SlideDeckValidator;

use serde_json::Value;

/// Long-form text under this many characters is flagged for review
pub(crate) const MIN_LONG_TEXT_CHARS: usize = 100;

/// Findings from validating one candidate value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Rule violations that block persistence
    pub errors: Vec<String>,
    /// Advisory findings; never block persistence
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Empty result (valid, nothing flagged)
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid iff there are no errors, regardless of warning count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a blocking error
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record an advisory warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Flatten a nested result into this one, prefixing every finding
    /// with a positional label so the failing sub-item stays identifiable
    pub fn absorb_labeled(&mut self, label: &str, other: ValidationResult) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{label}: {e}")));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{label}: {w}")));
    }
}

/// Structural pre-check: the candidate must be an object carrying every
/// required top-level field
///
/// This is the first gate before the richer per-field rules; it reports
/// one error per missing field and spares the later checks from chasing
/// absent keys.
pub fn validate_structure(value: &Value, required_fields: &[&str]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(object) = value.as_object() else {
        for field in required_fields {
            result.error(format!(
                "missing required field '{field}' (candidate is not an object)"
            ));
        }
        return result;
    };

    for field in required_fields {
        match object.get(*field) {
            None | Some(Value::Null) => {
                result.error(format!("missing required field '{field}'"));
            }
            Some(_) => {}
        }
    }

    result
}

/// Borrow a top-level string field, if present and actually a string
pub(crate) fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Required textual field: present (guaranteed by the structure gate) but
/// blank after trimming, or not text at all, is an error
pub(crate) fn check_required_text(result: &mut ValidationResult, value: &Value, key: &str) {
    match value.get(key) {
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                result.error(format!("field '{key}' must not be empty"));
            }
        }
        Some(_) => result.error(format!("field '{key}' must be text")),
        None => {}
    }
}

/// Long-form field shorter than `min_chars` is flagged for review
pub(crate) fn check_long_text(
    result: &mut ValidationResult,
    value: &Value,
    key: &str,
    min_chars: usize,
) {
    if let Some(text) = text_field(value, key) {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().count() < min_chars {
            result.warning(format!(
                "field '{key}' is under {min_chars} characters; flagged for review"
            ));
        }
    }
}

/// Optional numeric field with a closed bound; out-of-bound or non-numeric
/// is an error
pub(crate) fn check_bounded_number(
    result: &mut ValidationResult,
    value: &Value,
    key: &str,
    min: f64,
    max: f64,
) {
    match value.get(key) {
        None | Some(Value::Null) => {}
        Some(field) => match field.as_f64() {
            Some(number) if (min..=max).contains(&number) => {}
            Some(number) => result.error(format!(
                "field '{key}' is {number}, outside the allowed range [{min}, {max}]"
            )),
            None => result.error(format!("field '{key}' must be a number")),
        },
    }
}

/// Concatenate the free-text fields curriculum codes are expected in
pub(crate) fn code_haystack(value: &Value, keys: &[&str]) -> String {
    let mut haystack = String::new();
    for key in keys {
        if let Some(text) = text_field(value, key) {
            haystack.push_str(text);
            haystack.push('\n');
        }
        if let Some(items) = value.get(*key).and_then(Value::as_array) {
            for item in items.iter().filter_map(Value::as_str) {
                haystack.push_str(item);
                haystack.push('\n');
            }
        }
    }
    haystack
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.warning("short description");
        result.warning("unknown code");
        assert!(result.is_valid());
    }

    #[test]
    fn test_any_error_invalidates() {
        let mut result = ValidationResult::new();
        result.error("missing title");
        assert!(!result.is_valid());
    }

    #[test]
    fn test_absorb_labeled_prefixes_findings() {
        let mut nested = ValidationResult::new();
        nested.error("field 'statement' must not be empty");
        nested.warning("short");

        let mut parent = ValidationResult::new();
        parent.absorb_labeled("question 3", nested);

        assert_eq!(
            parent.errors,
            vec!["question 3: field 'statement' must not be empty"]
        );
        assert_eq!(parent.warnings, vec!["question 3: short"]);
        assert!(!parent.is_valid());
    }

    #[test]
    fn test_validate_structure_non_object() {
        let result = validate_structure(&json!("just text"), &["title", "content"]);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("title"));
        assert!(result.errors[1].contains("content"));
    }

    #[test]
    fn test_validate_structure_missing_and_null_fields() {
        let result = validate_structure(&json!({"title": "ok", "content": null}), &[
            "title", "content",
        ]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("content"));
    }

    #[test]
    fn test_validate_structure_complete_object() {
        let result = validate_structure(&json!({"title": "ok", "content": "x"}), &[
            "title", "content",
        ]);
        assert!(result.is_valid());
    }

    #[test]
    fn test_check_bounded_number() {
        let mut result = ValidationResult::new();
        check_bounded_number(&mut result, &json!({"duration_minutes": 50}), "duration_minutes", 15.0, 180.0);
        assert!(result.is_valid());

        check_bounded_number(&mut result, &json!({"duration_minutes": 10}), "duration_minutes", 15.0, 180.0);
        assert_eq!(result.errors.len(), 1);

        check_bounded_number(&mut result, &json!({"duration_minutes": "an hour"}), "duration_minutes", 15.0, 180.0);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_check_required_text_rejects_blank_and_non_text() {
        let mut result = ValidationResult::new();
        check_required_text(&mut result, &json!({"title": "   "}), "title");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("title"));

        check_required_text(&mut result, &json!({"title": 7}), "title");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_code_haystack_reads_strings_and_string_lists() {
        let value = json!({
            "content": "covers EF06MA01",
            "skills": ["EF06MA02", "EF06MA03"],
        });
        let haystack = code_haystack(&value, &["content", "skills"]);
        assert!(haystack.contains("EF06MA01"));
        assert!(haystack.contains("EF06MA03"));
    }
}
