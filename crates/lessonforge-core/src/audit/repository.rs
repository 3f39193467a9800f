//! Audit log persistence
//!
//! The repository trait keeps the append-only contract narrow: entries go
//! in, snapshots come out, and the only removal is the age-based purge.
//! No update surface exists by design of the trait itself.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::storage::KeyValueStore;

use super::entity::AuditLogEntry;

/// Storage key prefix for audit entries
const ENTRY_PREFIX: &str = "audit/entry/";

/// Repository trait for audit trail persistence
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append a new entry
    async fn append(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Snapshot of all entries, most recent first
    async fn list_all(&self) -> Result<Vec<AuditLogEntry>>;

    /// Remove every entry older than the cutoff; returns the count removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

/// Key-value-backed audit log repository
pub struct KvAuditLogRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvAuditLogRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn entry_key(entry: &AuditLogEntry) -> String {
        format!("{ENTRY_PREFIX}{}", entry.id)
    }
}

#[async_trait]
impl AuditLogRepository for KvAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        let payload = serde_json::to_string(entry)?;
        self.store.set(&Self::entry_key(entry), &payload).await?;
        debug!(entry_id = %entry.id, action = %entry.action, "Audit entry appended");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<AuditLogEntry>> {
        let mut entries = Vec::new();
        for (_, payload) in self.store.list(ENTRY_PREFIX).await? {
            entries.push(serde_json::from_str::<AuditLogEntry>(&payload)?);
        }
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut removed = 0u64;
        for (key, payload) in self.store.list(ENTRY_PREFIX).await? {
            let entry: AuditLogEntry = serde_json::from_str(&payload)?;
            if entry.timestamp < cutoff && self.store.delete(&key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
