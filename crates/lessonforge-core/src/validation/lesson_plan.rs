//! Lesson plan validation
//!
//! Checks a candidate lesson plan recovered from generator output before
//! it may become a persisted record.

use serde_json::Value;

use super::{
    check_bounded_number, check_long_text, check_required_text, code_haystack, extract_codes,
    validate_structure, CurriculumCatalog, ValidationResult, MIN_LONG_TEXT_CHARS,
};

/// Fields a lesson plan candidate must carry
const REQUIRED_FIELDS: &[&str] = &["title", "content"];

/// Free-text fields expected to cite curriculum codes
const CODE_FIELDS: &[&str] = &["content", "skills"];

/// Closed bound for the lesson duration, in minutes
const MIN_DURATION_MINUTES: f64 = 15.0;
const MAX_DURATION_MINUTES: f64 = 180.0;

/// Validator for lesson plan candidates
pub struct LessonPlanValidator;

impl LessonPlanValidator {
    /// Validate a candidate lesson plan value
    pub fn validate(value: &Value, catalog: &CurriculumCatalog) -> ValidationResult {
        let mut result = validate_structure(value, REQUIRED_FIELDS);
        if !result.is_valid() {
            return result;
        }

        check_required_text(&mut result, value, "title");
        check_required_text(&mut result, value, "content");
        check_long_text(&mut result, value, "content", MIN_LONG_TEXT_CHARS);
        check_bounded_number(
            &mut result,
            value,
            "duration_minutes",
            MIN_DURATION_MINUTES,
            MAX_DURATION_MINUTES,
        );

        let codes = extract_codes(&code_haystack(value, CODE_FIELDS));
        if codes.is_empty() {
            result.warning("no curriculum codes referenced; expected at least one BNCC code");
        } else {
            for code in codes {
                if !catalog.contains(&code) {
                    result.warning(format!(
                        "unrecognized curriculum code '{code}'; verify against the BNCC tables"
                    ));
                }
            }
        }

        result
    }
}
