//! Curriculum-code cross-referencing
//!
//! Generated content is expected to cite BNCC curriculum codes (e.g.
//! `EF06MA01`, `EM13LGG103`). The catalog is a closed set fixed at
//! construction; membership is only ever advisory — an unknown code is a
//! possible hallucination and becomes a warning, never a rejection,
//! because the catalog may lag behind the official tables.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// BNCC code grammar: two-letter stage prefix, two digits, a two-or-three
/// letter component, and a two-or-three digit sequence
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z]{2}\d{2}[A-Za-z]{2,3}\d{2,3}\b").expect("hard-coded pattern compiles")
});

/// Codes shipped with the default catalog
const DEFAULT_CODES: &[&str] = &[
    // Educação infantil
    "EI02EO01", "EI02EO02", "EI02EO03", "EI02EO04", "EI03EO01", "EI03EO02", "EI03EO03",
    "EI03ET01", "EI03ET02", "EI03ET03", "EI03ET04", "EI03ET05", "EI03ET06", "EI03ET07",
    // Língua portuguesa, anos finais
    "EF67LP01", "EF67LP02", "EF67LP03", "EF67LP04", "EF67LP05", "EF67LP06", "EF67LP07",
    "EF67LP08", "EF67LP09", "EF67LP10", "EF67LP11", "EF67LP12", "EF67LP13", "EF67LP14",
    "EF69LP01", "EF69LP02", "EF69LP03", "EF69LP04", "EF69LP05", "EF69LP06", "EF69LP07",
    "EF89LP01", "EF89LP02", "EF89LP03", "EF89LP04", "EF89LP05", "EF89LP06",
    // Matemática
    "EF06MA01", "EF06MA02", "EF06MA03", "EF06MA04", "EF06MA05", "EF06MA06", "EF06MA07",
    "EF06MA08", "EF06MA09", "EF06MA10", "EF06MA11", "EF06MA12", "EF06MA13",
    "EF07MA01", "EF07MA02", "EF07MA03", "EF07MA04", "EF07MA05", "EF07MA06", "EF07MA07",
    "EF07MA08", "EF07MA09",
    // Ciências
    "EF06CI01", "EF06CI02", "EF06CI03", "EF06CI04", "EF06CI05", "EF06CI06", "EF06CI07",
    "EF06CI08", "EF06CI09", "EF06CI10", "EF06CI11",
    "EF07CI01", "EF07CI02", "EF07CI03", "EF07CI04", "EF07CI05", "EF07CI06", "EF07CI07",
    "EF07CI08",
    // História e geografia
    "EF06HI01", "EF06HI02", "EF06HI03", "EF06HI04", "EF06HI05", "EF06HI06", "EF06HI07",
    "EF06HI08", "EF06HI09", "EF06HI10",
    "EF06GE01", "EF06GE02", "EF06GE03", "EF06GE04", "EF06GE05", "EF06GE06", "EF06GE07",
    "EF06GE08", "EF06GE09", "EF06GE10",
    // Ensino médio
    "EM13LGG101", "EM13LGG102", "EM13LGG103", "EM13LGG104", "EM13LGG201", "EM13LGG202",
    "EM13LGG203", "EM13LGG204", "EM13LGG301", "EM13LGG302", "EM13LGG303", "EM13LGG304",
    "EM13MAT101", "EM13MAT102", "EM13MAT103", "EM13MAT104", "EM13MAT105", "EM13MAT106",
    "EM13MAT201", "EM13MAT202", "EM13MAT203", "EM13MAT301", "EM13MAT302", "EM13MAT303",
    "EM13CNT101", "EM13CNT102", "EM13CNT103", "EM13CNT201", "EM13CNT202", "EM13CNT203",
    "EM13CNT204", "EM13CNT205", "EM13CNT206", "EM13CNT207",
    "EM13CHS101", "EM13CHS102", "EM13CHS103", "EM13CHS104", "EM13CHS105", "EM13CHS106",
    "EM13CHS201", "EM13CHS202", "EM13CHS203", "EM13CHS204", "EM13CHS205", "EM13CHS206",
];

/// Closed set of known curriculum codes, fixed at construction
#[derive(Debug, Clone)]
pub struct CurriculumCatalog {
    codes: HashSet<String>,
}

impl CurriculumCatalog {
    /// Build a catalog from an arbitrary code list (stored uppercased)
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|code| code.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Membership test, case-insensitive
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&code.to_uppercase())
    }

    /// Number of known codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CurriculumCatalog {
    /// The built-in BNCC table
    fn default() -> Self {
        Self::new(DEFAULT_CODES.iter().copied())
    }
}

/// Extract every curriculum-code-shaped substring from free text
///
/// Codes are uppercased and deduplicated case-insensitively, preserving
/// first-seen order.
pub fn extract_codes(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for found in CODE_PATTERN.find_iter(text) {
        let code = found.as_str().to_uppercase();
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    codes
}
