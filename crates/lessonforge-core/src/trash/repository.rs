//! Trash persistence
//!
//! Items are stored under their trash-item id, with a secondary index by
//! `(entity_kind, original_id)` so the duplicate-trash check is one read.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::content::EntityKind;
use crate::error::Result;
use crate::storage::KeyValueStore;

use super::entity::TrashItem;

/// Storage key prefix for trash items
const ITEM_PREFIX: &str = "trash/item/";

/// Storage key prefix for the origin index
const ORIGIN_PREFIX: &str = "trash/origin/";

/// Repository trait for trash persistence
#[async_trait]
pub trait TrashRepository: Send + Sync {
    /// Store a new trash item (and its origin index entry)
    async fn insert(&self, item: &TrashItem) -> Result<()>;

    /// Look up by trash-item id
    async fn get(&self, id: Uuid) -> Result<Option<TrashItem>>;

    /// Look up the active trash item for an entity, if any
    async fn find_by_original(
        &self,
        kind: EntityKind,
        original_id: &str,
    ) -> Result<Option<TrashItem>>;

    /// All trash items, most recently deleted first
    async fn list(&self) -> Result<Vec<TrashItem>>;

    /// Remove a trash item; removing an absent id is `Ok(false)`
    async fn remove(&self, id: Uuid) -> Result<bool>;
}

/// Key-value-backed trash repository
pub struct KvTrashRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvTrashRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn item_key(id: Uuid) -> String {
        format!("{ITEM_PREFIX}{id}")
    }

    fn origin_key(kind: EntityKind, original_id: &str) -> String {
        format!("{ORIGIN_PREFIX}{}/{original_id}", kind.as_str())
    }
}

#[async_trait]
impl TrashRepository for KvTrashRepository {
    async fn insert(&self, item: &TrashItem) -> Result<()> {
        let payload = serde_json::to_string(item)?;
        self.store.set(&Self::item_key(item.id), &payload).await?;
        self.store
            .set(
                &Self::origin_key(item.entity_kind, &item.original_id),
                &item.id.to_string(),
            )
            .await?;
        debug!(trash_item_id = %item.id, original_id = %item.original_id, "Trash item stored");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<TrashItem>> {
        match self.store.get(&Self::item_key(id)).await? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn find_by_original(
        &self,
        kind: EntityKind,
        original_id: &str,
    ) -> Result<Option<TrashItem>> {
        let Some(value) = self.store.get(&Self::origin_key(kind, original_id)).await? else {
            return Ok(None);
        };
        let Ok(id) = Uuid::parse_str(&value) else {
            return Ok(None);
        };
        self.get(id).await
    }

    async fn list(&self) -> Result<Vec<TrashItem>> {
        let mut items = Vec::new();
        for (_, payload) in self.store.list(ITEM_PREFIX).await? {
            items.push(serde_json::from_str::<TrashItem>(&payload)?);
        }
        items.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(items)
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let Some(item) = self.get(id).await? else {
            return Ok(false);
        };
        let removed = self.store.delete(&Self::item_key(id)).await?;
        self.store
            .delete(&Self::origin_key(item.entity_kind, &item.original_id))
            .await?;
        if removed {
            debug!(trash_item_id = %id, "Trash item removed");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Duration;
    use serde_json::json;

    fn repository() -> KvTrashRepository {
        KvTrashRepository::new(Arc::new(MemoryStore::new()))
    }

    fn item(original_id: &str) -> TrashItem {
        TrashItem::new(
            EntityKind::Activity,
            original_id,
            "Quiz",
            json!({"title": "Quiz"}),
            Duration::days(30),
        )
    }

    #[tokio::test]
    async fn test_insert_get_and_origin_lookup() {
        let repo = repository();
        let stored = item("act-1");
        repo.insert(&stored).await.unwrap();

        assert_eq!(repo.get(stored.id).await.unwrap(), Some(stored.clone()));
        assert_eq!(
            repo.find_by_original(EntityKind::Activity, "act-1").await.unwrap(),
            Some(stored.clone())
        );
        assert_eq!(
            repo.find_by_original(EntityKind::LessonPlan, "act-1").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_remove_clears_origin_index() {
        let repo = repository();
        let stored = item("act-1");
        repo.insert(&stored).await.unwrap();

        assert!(repo.remove(stored.id).await.unwrap());
        assert_eq!(repo.get(stored.id).await.unwrap(), None);
        assert_eq!(
            repo.find_by_original(EntityKind::Activity, "act-1").await.unwrap(),
            None
        );

        // double removal is a no-op, not an error
        assert!(!repo.remove(stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_deletion_recency() {
        let repo = repository();
        let first = item("act-1");
        let second = item("act-2");
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].deleted_at >= listed[1].deleted_at);
    }
}
