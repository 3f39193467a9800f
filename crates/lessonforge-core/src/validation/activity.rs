//! Activity (quiz) validation
//!
//! Activities carry a question list; each question is validated
//! independently and its findings are flattened into the parent result
//! under a positional label, so one malformed question never obscures
//! which one failed.

use serde_json::Value;

use super::{
    check_bounded_number, check_long_text, check_required_text, code_haystack, extract_codes,
    validate_structure, CurriculumCatalog, ValidationResult, MIN_LONG_TEXT_CHARS,
};

/// Fields an activity candidate must carry
const REQUIRED_FIELDS: &[&str] = &["title", "questions"];

/// Free-text fields that may cite curriculum codes
const CODE_FIELDS: &[&str] = &["instructions", "skills"];

/// Expected total of question points across the activity
const TARGET_POINTS_TOTAL: f64 = 100.0;

/// Closed bound for a single question's points
const MIN_QUESTION_POINTS: f64 = 1.0;
const MAX_QUESTION_POINTS: f64 = 100.0;

/// Validator for activity candidates
pub struct ActivityValidator;

impl ActivityValidator {
    /// Validate a candidate activity value
    pub fn validate(value: &Value, catalog: &CurriculumCatalog) -> ValidationResult {
        let mut result = validate_structure(value, REQUIRED_FIELDS);
        if !result.is_valid() {
            return result;
        }

        check_required_text(&mut result, value, "title");
        check_long_text(&mut result, value, "instructions", MIN_LONG_TEXT_CHARS);

        match value.get("questions").and_then(Value::as_array) {
            None => result.error("field 'questions' must be a list"),
            Some(questions) if questions.is_empty() => {
                result.error("field 'questions' must contain at least one question");
            }
            Some(questions) => {
                for (index, question) in questions.iter().enumerate() {
                    let label = format!("question {}", index + 1);
                    result.absorb_labeled(&label, Self::validate_question(question));
                }
                Self::check_points_total(&mut result, questions);
            }
        }

        // Codes are optional on activities; only unknown ones are flagged.
        for code in extract_codes(&code_haystack(value, CODE_FIELDS)) {
            if !catalog.contains(&code) {
                result.warning(format!(
                    "unrecognized curriculum code '{code}'; verify against the BNCC tables"
                ));
            }
        }

        result
    }

    /// Validate one question independently
    fn validate_question(question: &Value) -> ValidationResult {
        let mut result = validate_structure(question, &["statement"]);
        if !result.is_valid() {
            return result;
        }

        check_required_text(&mut result, question, "statement");
        check_bounded_number(
            &mut result,
            question,
            "points",
            MIN_QUESTION_POINTS,
            MAX_QUESTION_POINTS,
        );

        if let Some(options) = question.get("options") {
            match options.as_array() {
                None => result.error("field 'options' must be a list"),
                Some(options) => {
                    if options.len() < 2 {
                        result.error("field 'options' must offer at least two choices");
                    }
                    for (index, option) in options.iter().enumerate() {
                        match option.as_str() {
                            Some(text) if !text.trim().is_empty() => {}
                            _ => result.error(format!("option {} must be non-empty text", index + 1)),
                        }
                    }
                    if let Some(correct) = question.get("correct_index") {
                        match correct.as_u64() {
                            Some(index) if (index as usize) < options.len() => {}
                            _ => result.error(
                                "field 'correct_index' must reference one of the options",
                            ),
                        }
                    }
                }
            }
        }

        result
    }

    /// Points across the question list should total 100; deviation is
    /// tolerated but flagged
    fn check_points_total(result: &mut ValidationResult, questions: &[Value]) {
        let points: Vec<f64> = questions
            .iter()
            .filter_map(|q| q.get("points").and_then(Value::as_f64))
            .collect();
        if points.is_empty() {
            return;
        }
        let total: f64 = points.iter().sum();
        if (total - TARGET_POINTS_TOTAL).abs() > f64::EPSILON {
            result.warning(format!(
                "question points total {total}, expected {TARGET_POINTS_TOTAL}"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> CurriculumCatalog {
        CurriculumCatalog::default()
    }

    fn question(statement: &str, points: f64) -> Value {
        json!({
            "statement": statement,
            "options": ["2/4", "3/4", "1/3", "5/8"],
            "correct_index": 0,
            "points": points,
        })
    }

    #[test]
    fn test_valid_activity() {
        let value = json!({
            "title": "Quiz de frações",
            "questions": [
                question("Qual fração equivale a 1/2?", 50.0),
                question("Qual fração equivale a 2/8?", 50.0),
            ],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_question_list_is_error() {
        let value = json!({"title": "Quiz", "questions": []});
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.contains("questions")));
    }

    #[test]
    fn test_question_findings_carry_positional_labels() {
        let value = json!({
            "title": "Quiz",
            "questions": [
                question("Pergunta válida?", 50.0),
                {"statement": "   "},
                {"options": ["a", "b"]},
            ],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("question 2:") && e.contains("statement")));
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("question 3:") && e.contains("statement")));
    }

    #[test]
    fn test_points_imbalance_is_warning_not_error() {
        let value = json!({
            "title": "Quiz",
            "questions": [
                question("Uma?", 30.0),
                question("Outra?", 30.0),
            ],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.contains("expected 100")));
    }

    #[test]
    fn test_questions_without_points_skip_total_check() {
        let value = json!({
            "title": "Quiz",
            "questions": [{"statement": "Sem pontuação?"}],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_single_option_is_error() {
        let value = json!({
            "title": "Quiz",
            "questions": [{"statement": "Só uma opção?", "options": ["única"]}],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("question 1:") && e.contains("two choices")));
    }

    #[test]
    fn test_correct_index_out_of_range_is_error() {
        let value = json!({
            "title": "Quiz",
            "questions": [{
                "statement": "Qual?",
                "options": ["a", "b"],
                "correct_index": 5,
            }],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result.errors.iter().any(|e| e.contains("correct_index")));
    }

    #[test]
    fn test_out_of_bound_points_is_error() {
        let value = json!({
            "title": "Quiz",
            "questions": [{"statement": "Qual?", "points": 150}],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.contains("points")));
    }

    #[test]
    fn test_unknown_code_in_instructions_is_warning() {
        let value = json!({
            "title": "Quiz",
            "instructions": "Responda com base em ZZ99QQ11, consultando o material da aula anterior e justificando cada alternativa escolhida por escrito.",
            "questions": [question("Qual?", 100.0)],
        });
        let result = ActivityValidator::validate(&value, &catalog());
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.contains("ZZ99QQ11")));
    }
}
