//! Storage abstraction
//!
//! The core persists through an injected key-value seam; it never assumes
//! a concrete persistence technology. Two backends ship with the crate:
//! an in-memory store (tests, previews) and a SQLite store built on the
//! same pool/migration bootstrap the rest of the stack uses.
//!
//! Storage faults are a distinct error family from domain errors so
//! callers can retry them without ever blindly retrying a validation
//! failure.

pub mod database;
pub mod memory;
pub mod migrations;

pub use database::{Database, DatabaseConfig, SqliteStore};
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Faults raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("read of key '{key}' failed: {message}")]
    Read { key: String, message: String },

    #[error("write of key '{key}' failed: {message}")]
    Write { key: String, message: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Injected key-value store over arbitrary string keys
///
/// `set` of an existing key overwrites; `delete` reports whether a record
/// was actually removed (removing an absent key is `Ok(false)`, which is
/// what lets concurrent sweeps and restores race safely); `list` returns
/// key-ordered `(key, value)` pairs under a prefix.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
    async fn list(&self, prefix: &str) -> Result<Vec<(String, String)>, StorageError>;
}
