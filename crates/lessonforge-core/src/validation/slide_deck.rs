//! Slide deck validation

use serde_json::Value;

use super::{check_required_text, validate_structure, ValidationResult};

/// Fields a slide deck candidate must carry
const REQUIRED_FIELDS: &[&str] = &["title", "slides"];

/// Validator for slide deck candidates
pub struct SlideDeckValidator;

impl SlideDeckValidator {
    /// Validate a candidate slide deck value
    pub fn validate(value: &Value) -> ValidationResult {
        let mut result = validate_structure(value, REQUIRED_FIELDS);
        if !result.is_valid() {
            return result;
        }

        check_required_text(&mut result, value, "title");

        match value.get("slides").and_then(Value::as_array) {
            None => result.error("field 'slides' must be a list"),
            Some(slides) if slides.is_empty() => {
                result.error("field 'slides' must contain at least one slide");
            }
            Some(slides) => {
                for (index, slide) in slides.iter().enumerate() {
                    let label = format!("slide {}", index + 1);
                    result.absorb_labeled(&label, Self::validate_slide(slide));
                }
            }
        }

        result
    }

    /// Validate one slide independently
    fn validate_slide(slide: &Value) -> ValidationResult {
        let mut result = validate_structure(slide, &["title"]);
        if !result.is_valid() {
            return result;
        }

        check_required_text(&mut result, slide, "title");

        match slide.get("body").and_then(Value::as_str) {
            Some(body) if !body.trim().is_empty() => {}
            _ => result.warning("slide has no body content"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_deck() {
        let value = json!({
            "title": "Ciclo da água",
            "slides": [
                {"title": "Evaporação", "body": "A água líquida passa ao estado gasoso."},
                {"title": "Condensação", "body": "O vapor forma nuvens ao esfriar."},
            ],
        });
        let result = SlideDeckValidator::validate(&value);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_slides_is_error() {
        let value = json!({"title": "Deck", "slides": []});
        let result = SlideDeckValidator::validate(&value);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.contains("slides")));
    }

    #[test]
    fn test_slide_without_title_is_labeled_error() {
        let value = json!({
            "title": "Deck",
            "slides": [
                {"title": "Abertura", "body": "ok"},
                {"body": "sem título"},
            ],
        });
        let result = SlideDeckValidator::validate(&value);
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("slide 2:") && e.contains("title")));
    }

    #[test]
    fn test_slide_without_body_is_warning() {
        let value = json!({
            "title": "Deck",
            "slides": [{"title": "Só título"}],
        });
        let result = SlideDeckValidator::validate(&value);
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("slide 1:") && w.contains("body")));
    }
}
