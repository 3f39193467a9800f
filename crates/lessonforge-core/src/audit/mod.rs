//! Audit trail
//!
//! Append-only record of every lifecycle-changing action. Entries are
//! immutable once written: the public surface offers appends, read-only
//! recency-ordered queries, and a single explicit age-based purge that is
//! never invoked by any other component.

mod entity;
mod repository;
mod service;

pub use entity::{AuditAction, AuditLogEntry};
pub use repository::{AuditLogRepository, KvAuditLogRepository};
pub use service::AuditLog;
