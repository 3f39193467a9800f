//! Generation intake pipeline
//!
//! The one place raw generator text becomes a durable domain record:
//! recovery parse first, then the shape's validator, then construction of
//! the typed record with its archive state normalized. A candidate that
//! fails either stage goes nowhere — nothing is persisted, trashed, or
//! audited on the failure path.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::archive::{assert_can_generate_for, ensure_integrity, Archivable};
use crate::content::{Activity, LessonPlan, Question, Slide, SlideDeck};
use crate::error::Result;
use crate::recovery::{parse, ParseOutcome};
use crate::validation::{
    ActivityValidator, CurriculumCatalog, LessonPlanValidator, SlideDeckValidator,
    ValidationResult,
};

/// Result of running raw generator text through the intake pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome<T> {
    /// No structured value could be recovered from the text
    Rejected { reason: String },
    /// A value was recovered but validation found blocking errors
    Invalid {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    /// The validated record, with any advisory warnings for review
    Accepted { record: T, warnings: Vec<String> },
}

impl<T> IntakeOutcome<T> {
    /// True if a record was produced
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Borrow the accepted record, if any
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Accepted { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Consume the outcome, yielding the accepted record
    pub fn into_record(self) -> Option<T> {
        match self {
            Self::Accepted { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Warnings gathered during validation (empty on rejection)
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Invalid { warnings, .. } | Self::Accepted { warnings, .. } => warnings,
            Self::Rejected { .. } => &[],
        }
    }
}

#[derive(Deserialize)]
struct LessonPlanPayload {
    title: String,
    content: String,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    duration_minutes: Option<f64>,
}

#[derive(Deserialize)]
struct ActivityPayload {
    title: String,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct SlideDeckPayload {
    title: String,
    slides: Vec<Slide>,
}

/// Intake pipeline for generated content
pub struct ContentIntake {
    catalog: CurriculumCatalog,
}

impl Default for ContentIntake {
    fn default() -> Self {
        Self::new(CurriculumCatalog::default())
    }
}

impl ContentIntake {
    /// Build an intake pipeline over the given curriculum catalog
    pub fn new(catalog: CurriculumCatalog) -> Self {
        Self { catalog }
    }

    /// Turn raw generator text into a lesson plan record
    pub fn ingest_lesson_plan(&self, raw: &str) -> IntakeOutcome<LessonPlan> {
        let (value, result) = match self.recover(raw, |value| {
            LessonPlanValidator::validate(value, &self.catalog)
        }) {
            Ok(recovered) => recovered,
            Err(outcome) => return outcome,
        };

        match serde_json::from_value::<LessonPlanPayload>(value) {
            Ok(payload) => accept(
                LessonPlan::new(
                    payload.title,
                    payload.content,
                    payload.skills,
                    payload.duration_minutes.map(|d| d.round() as u32),
                ),
                result,
            ),
            Err(e) => shape_mismatch("lesson plan", e, result),
        }
    }

    /// Turn raw generator text into an activity record
    pub fn ingest_activity(&self, raw: &str) -> IntakeOutcome<Activity> {
        let (value, result) = match self.recover(raw, |value| {
            ActivityValidator::validate(value, &self.catalog)
        }) {
            Ok(recovered) => recovered,
            Err(outcome) => return outcome,
        };

        match serde_json::from_value::<ActivityPayload>(value) {
            Ok(payload) => accept(
                Activity::new(
                    payload.title,
                    payload.instructions,
                    payload.skills,
                    payload.questions,
                ),
                result,
            ),
            Err(e) => shape_mismatch("activity", e, result),
        }
    }

    /// Turn raw generator text into a slide deck record
    pub fn ingest_slide_deck(&self, raw: &str) -> IntakeOutcome<SlideDeck> {
        let (value, result) = match self.recover(raw, SlideDeckValidator::validate) {
            Ok(recovered) => recovered,
            Err(outcome) => return outcome,
        };

        match serde_json::from_value::<SlideDeckPayload>(value) {
            Ok(payload) => accept(SlideDeck::new(payload.title, payload.slides), result),
            Err(e) => shape_mismatch("slide deck", e, result),
        }
    }

    /// Gate for regenerating content against an existing entity; archived
    /// entities never accept generation
    pub fn ensure_generation_allowed<T: Archivable>(&self, entity: &T) -> Result<()> {
        assert_can_generate_for(entity)?;
        Ok(())
    }

    /// Shared parse-then-validate front half of every ingest
    fn recover<T>(
        &self,
        raw: &str,
        validate: impl Fn(&Value) -> ValidationResult,
    ) -> std::result::Result<(Value, ValidationResult), IntakeOutcome<T>> {
        let value = match parse(raw) {
            ParseOutcome::Success(value) => value,
            ParseOutcome::Failure(reason) => {
                debug!(reason = %reason, "Generator response rejected by recovery parser");
                return Err(IntakeOutcome::Rejected { reason });
            }
        };

        let result = validate(&value);
        if !result.is_valid() {
            debug!(errors = result.errors.len(), "Candidate failed validation");
            return Err(IntakeOutcome::Invalid {
                errors: result.errors,
                warnings: result.warnings,
            });
        }

        Ok((value, result))
    }
}

/// Wrap a freshly built record, normalizing its archive state on the way
/// out
fn accept<T: Archivable + Clone>(record: T, result: ValidationResult) -> IntakeOutcome<T> {
    IntakeOutcome::Accepted {
        record: ensure_integrity(&record),
        warnings: result.warnings,
    }
}

/// A candidate that passed validation but does not deserialize into the
/// record shape; surfaces as a blocking finding rather than a panic
fn shape_mismatch<T>(
    shape: &str,
    error: serde_json::Error,
    result: ValidationResult,
) -> IntakeOutcome<T> {
    IntakeOutcome::Invalid {
        errors: vec![format!("candidate does not fit the {shape} shape: {error}")],
        warnings: result.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EntityKind;

    fn intake() -> ContentIntake {
        ContentIntake::default()
    }

    fn plan_response() -> String {
        "Claro! Segue o plano:\n```json\n{\n  \"title\": \"Frações equivalentes\",\n  \"content\": \"Aula expositiva sobre frações equivalentes com resolução guiada de exercícios em duplas e discussão coletiva, contemplando a habilidade EF06MA07.\",\n  \"duration_minutes\": 50\n}\n```".to_string()
    }

    #[test]
    fn test_ingest_lesson_plan_from_fenced_response() {
        let outcome = intake().ingest_lesson_plan(&plan_response());
        let record = outcome.record().expect("accepted");
        assert_eq!(record.title, "Frações equivalentes");
        assert_eq!(record.duration_minutes, Some(50));
        assert!(!record.archive.archived);
    }

    #[test]
    fn test_empty_title_is_invalid_not_rejected() {
        let raw = "Here is the plan:\n```json\n{\"title\":\"\",\"content\":\"ok\"}\n```";
        match intake().ingest_lesson_plan(raw) {
            IntakeOutcome::Invalid { errors, .. } => {
                assert!(errors.iter().any(|e| e.contains("title")));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_response_is_rejected() {
        match intake().ingest_lesson_plan("the generator rambled with no payload") {
            IntakeOutcome::Rejected { reason } => {
                assert!(reason.contains("no valid JSON"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_ingest_activity_carries_warnings() {
        let raw = r#"{
            "title": "Quiz de frações",
            "questions": [
                {"statement": "Qual fração equivale a 1/2?", "options": ["2/4", "1/3"], "correct_index": 0, "points": 60},
                {"statement": "Qual fração equivale a 2/8?", "options": ["1/4", "1/2"], "correct_index": 0, "points": 60}
            ]
        }"#;
        match intake().ingest_activity(raw) {
            IntakeOutcome::Accepted { record, warnings } => {
                assert_eq!(record.questions.len(), 2);
                assert!(warnings.iter().any(|w| w.contains("expected 100")));
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn test_ingest_slide_deck() {
        let raw = r#"{"title": "Ciclo da água", "slides": [{"title": "Evaporação", "body": "A água sobe."}]}"#;
        let outcome = intake().ingest_slide_deck(raw);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.record().unwrap().slides.len(), 1);
    }

    #[test]
    fn test_generation_blocked_for_archived_entity() {
        let intake = intake();
        let mut plan = intake
            .ingest_lesson_plan(&plan_response())
            .into_record()
            .expect("accepted");
        intake.ensure_generation_allowed(&plan).unwrap();

        plan.archive.archive();
        let err = intake.ensure_generation_allowed(&plan).unwrap_err();
        assert_eq!(err.code(), "E100");
        assert!(err.to_string().contains(EntityKind::LessonPlan.to_string().as_str()));
    }
}
