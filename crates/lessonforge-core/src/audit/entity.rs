//! Audit log entries

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::content::EntityKind;

/// Lifecycle-changing actions recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    DisciplineDeleted,
    ClassGroupDeleted,
    LessonPlanDeleted,
    ActivityDeleted,
    SlideDeckDeleted,
    TrashRestored,
    TrashPurged,
    Archived,
    Unarchived,
    Generated,
}

impl AuditAction {
    /// Stable machine identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisciplineDeleted => "discipline_deleted",
            Self::ClassGroupDeleted => "class_group_deleted",
            Self::LessonPlanDeleted => "lesson_plan_deleted",
            Self::ActivityDeleted => "activity_deleted",
            Self::SlideDeckDeleted => "slide_deck_deleted",
            Self::TrashRestored => "trash_restored",
            Self::TrashPurged => "trash_purged",
            Self::Archived => "archived",
            Self::Unarchived => "unarchived",
            Self::Generated => "generated",
        }
    }

    /// Parse the machine identifier back into an action
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "discipline_deleted" => Some(Self::DisciplineDeleted),
            "class_group_deleted" => Some(Self::ClassGroupDeleted),
            "lesson_plan_deleted" => Some(Self::LessonPlanDeleted),
            "activity_deleted" => Some(Self::ActivityDeleted),
            "slide_deck_deleted" => Some(Self::SlideDeckDeleted),
            "trash_restored" => Some(Self::TrashRestored),
            "trash_purged" => Some(Self::TrashPurged),
            "archived" => Some(Self::Archived),
            "unarchived" => Some(Self::Unarchived),
            "generated" => Some(Self::Generated),
            _ => None,
        }
    }

    /// The soft-delete action for an entity kind
    pub fn soft_delete(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Discipline => Self::DisciplineDeleted,
            EntityKind::ClassGroup => Self::ClassGroupDeleted,
            EntityKind::LessonPlan => Self::LessonPlanDeleted,
            EntityKind::Activity => Self::ActivityDeleted,
            EntityKind::SlideDeck => Self::SlideDeckDeleted,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub action: AuditAction,
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub entity_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Build a fresh entry stamped now
    pub fn new(
        action: AuditAction,
        entity_kind: EntityKind,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        user_id: Option<String>,
        metadata: Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            entity_kind,
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            user_id,
            metadata,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip() {
        for action in [
            AuditAction::DisciplineDeleted,
            AuditAction::ClassGroupDeleted,
            AuditAction::LessonPlanDeleted,
            AuditAction::ActivityDeleted,
            AuditAction::SlideDeckDeleted,
            AuditAction::TrashRestored,
            AuditAction::TrashPurged,
            AuditAction::Archived,
            AuditAction::Unarchived,
            AuditAction::Generated,
        ] {
            assert_eq!(AuditAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(AuditAction::parse("renamed"), None);
    }

    #[test]
    fn test_soft_delete_action_derives_from_kind() {
        assert_eq!(
            AuditAction::soft_delete(EntityKind::Activity),
            AuditAction::ActivityDeleted
        );
        assert_eq!(
            AuditAction::soft_delete(EntityKind::LessonPlan),
            AuditAction::LessonPlanDeleted
        );
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let entry = AuditLogEntry::new(
            AuditAction::TrashRestored,
            EntityKind::Activity,
            "act-1",
            "Quiz de frações",
            Some("teacher-7".to_string()),
            serde_json::json!({"trash_item_id": "x"}),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: AuditLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
