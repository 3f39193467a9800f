//! Trash lifecycle service

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::{AuditAction, AuditLog};
use crate::config::CoreConfig;
use crate::content::EntityKind;
use crate::error::{Error, Result};

use super::entity::TrashItem;
use super::repository::TrashRepository;

/// Soft-delete lifecycle over an injected repository
///
/// Every transition except the bulk expiry sweep appends an audit entry.
pub struct TrashService {
    repository: Arc<dyn TrashRepository>,
    audit: Arc<AuditLog>,
    retention: Duration,
    /// Serializes the duplicate check with the insert in `move_to_trash`;
    /// without it two concurrent deletes of the same entity could both
    /// pass the check and leave two trash records
    move_lock: Mutex<()>,
}

impl TrashService {
    pub fn new(
        repository: Arc<dyn TrashRepository>,
        audit: Arc<AuditLog>,
        config: &CoreConfig,
    ) -> Self {
        Self {
            repository,
            audit,
            retention: config.trash_retention(),
            move_lock: Mutex::new(()),
        }
    }

    /// Soft-delete an entity into the trash
    ///
    /// Fails with `AlreadyTrashed` if an active trash record exists for
    /// the same `(entity_kind, original_id)` pair.
    pub async fn move_to_trash(
        &self,
        entity_kind: EntityKind,
        original_id: &str,
        entity_name: &str,
        entity_data: Value,
    ) -> Result<TrashItem> {
        let _guard = self.move_lock.lock().await;

        if self
            .repository
            .find_by_original(entity_kind, original_id)
            .await?
            .is_some()
        {
            return Err(Error::AlreadyTrashed {
                kind: entity_kind,
                original_id: original_id.to_string(),
            });
        }

        let item = TrashItem::new(
            entity_kind,
            original_id,
            entity_name,
            entity_data,
            self.retention,
        );
        self.repository.insert(&item).await?;

        self.audit
            .log(
                AuditAction::soft_delete(entity_kind),
                entity_kind,
                original_id,
                entity_name,
                None,
                json!({"trash_item_id": item.id}),
            )
            .await?;

        info!(trash_item_id = %item.id, kind = entity_kind.as_str(), original_id, "Entity moved to trash");
        Ok(item)
    }

    /// Remove an item from the trash and hand its snapshot back
    ///
    /// The snapshot is returned by the same call that removes the record,
    /// so the caller re-materializes the entity from the returned value
    /// with no second lookup between removal and re-insertion.
    pub async fn restore(&self, trash_item_id: Uuid) -> Result<TrashItem> {
        let item = self
            .repository
            .get(trash_item_id)
            .await?
            .ok_or(Error::TrashItemNotFound(trash_item_id))?;

        self.repository.remove(trash_item_id).await?;

        self.audit
            .log(
                AuditAction::TrashRestored,
                item.entity_kind,
                &item.original_id,
                &item.entity_name,
                None,
                json!({"trash_item_id": item.id}),
            )
            .await?;

        info!(trash_item_id = %item.id, original_id = %item.original_id, "Trash item restored");
        Ok(item)
    }

    /// Permanently delete an item from the trash
    pub async fn delete_permanently(&self, trash_item_id: Uuid) -> Result<()> {
        let item = self
            .repository
            .get(trash_item_id)
            .await?
            .ok_or(Error::TrashItemNotFound(trash_item_id))?;

        self.repository.remove(trash_item_id).await?;

        self.audit
            .log(
                AuditAction::TrashPurged,
                item.entity_kind,
                &item.original_id,
                &item.entity_name,
                None,
                json!({"trash_item_id": item.id}),
            )
            .await?;

        warn!(trash_item_id = %item.id, original_id = %item.original_id, "Trash item permanently deleted");
        Ok(())
    }

    /// Remove every expired item, returning the count removed
    ///
    /// The sweep does not audit per item; a single summary log line keeps
    /// it observable without flooding the trail. Items removed by a
    /// concurrent restore are simply not counted.
    pub async fn clean_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let mut removed = 0u64;
        for item in self.repository.list().await? {
            if item.is_expired(now) && self.repository.remove(item.id).await? {
                removed += 1;
            }
        }
        info!(removed, "Expired trash items swept");
        Ok(removed)
    }

    /// All trash items, most recently deleted first
    pub async fn list(&self) -> Result<Vec<TrashItem>> {
        self.repository.list().await
    }

    /// The active trash item for an entity, if any
    pub async fn find_by_original(
        &self,
        entity_kind: EntityKind,
        original_id: &str,
    ) -> Result<Option<TrashItem>> {
        self.repository.find_by_original(entity_kind, original_id).await
    }
}
