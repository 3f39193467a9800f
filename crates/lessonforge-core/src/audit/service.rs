//! Audit log service

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::content::EntityKind;
use crate::error::Result;

use super::entity::{AuditAction, AuditLogEntry};
use super::repository::AuditLogRepository;

/// Append-only audit trail over an injected repository
pub struct AuditLog {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLog {
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    /// Record a lifecycle-changing action
    pub async fn log(
        &self,
        action: AuditAction,
        entity_kind: EntityKind,
        entity_id: &str,
        entity_name: &str,
        user_id: Option<&str>,
        metadata: Value,
    ) -> Result<AuditLogEntry> {
        let entry = AuditLogEntry::new(
            action,
            entity_kind,
            entity_id,
            entity_name,
            user_id.map(str::to_string),
            metadata,
        );
        self.repository.append(&entry).await?;
        debug!(action = %action, entity_id, "Lifecycle action audited");
        Ok(entry)
    }

    /// All entries, most recent first
    pub async fn find_all(&self) -> Result<Vec<AuditLogEntry>> {
        self.repository.list_all().await
    }

    /// Entries for one action, most recent first
    pub async fn find_by_action(&self, action: AuditAction) -> Result<Vec<AuditLogEntry>> {
        let mut entries = self.repository.list_all().await?;
        entries.retain(|entry| entry.action == action);
        Ok(entries)
    }

    /// Entries for one entity kind, most recent first
    pub async fn find_by_entity_kind(&self, kind: EntityKind) -> Result<Vec<AuditLogEntry>> {
        let mut entries = self.repository.list_all().await?;
        entries.retain(|entry| entry.entity_kind == kind);
        Ok(entries)
    }

    /// Entries for one entity id, most recent first
    pub async fn find_by_entity_id(&self, entity_id: &str) -> Result<Vec<AuditLogEntry>> {
        let mut entries = self.repository.list_all().await?;
        entries.retain(|entry| entry.entity_id == entity_id);
        Ok(entries)
    }

    /// Purge entries older than the given number of days; the only removal
    /// in the contract, and only ever triggered explicitly by a caller
    pub async fn delete_older_than(&self, days: i64) -> Result<u64> {
        let cutoff = Utc::now() - Duration::days(days);
        let removed = self.repository.delete_older_than(cutoff).await?;
        info!(removed, days, "Purged old audit entries");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::repository::KvAuditLogRepository;
    use crate::storage::MemoryStore;

    fn audit_log() -> AuditLog {
        AuditLog::new(Arc::new(KvAuditLogRepository::new(Arc::new(
            MemoryStore::new(),
        ))))
    }

    #[tokio::test]
    async fn test_log_and_query_by_entity_id() {
        let log = audit_log();
        log.log(
            AuditAction::Generated,
            EntityKind::LessonPlan,
            "plan-1",
            "Frações",
            Some("teacher-7"),
            Value::Null,
        )
        .await
        .unwrap();
        log.log(
            AuditAction::Archived,
            EntityKind::LessonPlan,
            "plan-2",
            "Ciclo da água",
            None,
            Value::Null,
        )
        .await
        .unwrap();
        log.log(
            AuditAction::Archived,
            EntityKind::LessonPlan,
            "plan-1",
            "Frações",
            None,
            Value::Null,
        )
        .await
        .unwrap();

        let entries = log.find_by_entity_id("plan-1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.entity_id == "plan-1"));
        assert!(entries[0].timestamp >= entries[1].timestamp);
    }

    #[tokio::test]
    async fn test_query_by_action_and_kind() {
        let log = audit_log();
        log.log(
            AuditAction::ActivityDeleted,
            EntityKind::Activity,
            "act-1",
            "Quiz",
            None,
            Value::Null,
        )
        .await
        .unwrap();
        log.log(
            AuditAction::TrashRestored,
            EntityKind::Activity,
            "act-1",
            "Quiz",
            None,
            Value::Null,
        )
        .await
        .unwrap();

        let deleted = log.find_by_action(AuditAction::ActivityDeleted).await.unwrap();
        assert_eq!(deleted.len(), 1);

        let activity_entries = log.find_by_entity_kind(EntityKind::Activity).await.unwrap();
        assert_eq!(activity_entries.len(), 2);

        assert!(log
            .find_by_action(AuditAction::TrashPurged)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_older_than_spares_recent_entries() {
        let log = audit_log();
        log.log(
            AuditAction::Generated,
            EntityKind::SlideDeck,
            "deck-1",
            "Ciclo da água",
            None,
            Value::Null,
        )
        .await
        .unwrap();

        let removed = log.delete_older_than(30).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(log.find_all().await.unwrap().len(), 1);
    }
}
