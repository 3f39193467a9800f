//! Trash items

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::content::EntityKind;

/// A soft-deleted entity held for the retention window
///
/// `id` identifies the trash item itself; `original_id` identifies the
/// snapshotted entity. The two live in different value spaces on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashItem {
    pub id: Uuid,
    pub entity_kind: EntityKind,
    pub original_id: String,
    pub entity_name: String,
    /// Opaque snapshot of the entity at deletion time
    pub entity_data: Value,
    pub deleted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TrashItem {
    /// Snapshot an entity into the trash, stamped now
    pub fn new(
        entity_kind: EntityKind,
        original_id: impl Into<String>,
        entity_name: impl Into<String>,
        entity_data: Value,
        retention: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            entity_kind,
            original_id: original_id.into(),
            entity_name: entity_name.into(),
            entity_data,
            deleted_at: now,
            expires_at: now + retention,
        }
    }

    /// Whether the retention window has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expiry_follows_retention() {
        let item = TrashItem::new(
            EntityKind::Activity,
            "act-1",
            "Quiz",
            json!({"title": "Quiz"}),
            Duration::days(30),
        );
        assert_eq!(item.expires_at, item.deleted_at + Duration::days(30));
        assert!(!item.is_expired(Utc::now()));
        assert!(item.is_expired(item.expires_at));
        assert!(item.is_expired(item.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_trash_id_differs_from_original_id() {
        let item = TrashItem::new(
            EntityKind::LessonPlan,
            Uuid::new_v4().to_string(),
            "Plano",
            json!({}),
            Duration::days(30),
        );
        assert_ne!(item.id.to_string(), item.original_id);
    }

    #[test]
    fn test_serde_round_trip() {
        let item = TrashItem::new(
            EntityKind::SlideDeck,
            "deck-1",
            "Ciclo da água",
            json!({"slides": []}),
            Duration::days(30),
        );
        let json = serde_json::to_string(&item).unwrap();
        let back: TrashItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
