//! Error types for Lessonforge

use thiserror::Error;
use uuid::Uuid;

use crate::archive::ArchivePolicyError;
use crate::content::EntityKind;
use crate::storage::StorageError;

/// Result type alias using Lessonforge's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Lessonforge error types with helpful messages
///
/// Parse failures and validation findings are deliberately absent here:
/// they are ordinary data (`ParseOutcome`, `ValidationResult`), not errors.
/// This enum covers caller-contract violations and infrastructure faults.
#[derive(Error, Debug)]
pub enum Error {
    // Trash lifecycle errors (E001-E099)
    #[error("Trash item '{0}' not found. It may have been restored or permanently deleted.")]
    TrashItemNotFound(Uuid),

    #[error("{kind} '{original_id}' is already in the trash. Restore it or delete it permanently first.")]
    AlreadyTrashed {
        kind: EntityKind,
        original_id: String,
    },

    // Archive policy errors (E100-E199)
    #[error(transparent)]
    Archive(#[from] ArchivePolicyError),

    // Storage errors (E400-E499)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::TrashItemNotFound(_) => "E001",
            Self::AlreadyTrashed { .. } => "E002",
            Self::Archive(_) => "E100",
            Self::Storage(_) => "E400",
            Self::Serialization(_) => "E401",
            Self::InvalidInput(_) => "E800",
        }
    }

    /// Whether retrying the same call can succeed without the caller
    /// changing anything. Only storage faults qualify; contract
    /// violations never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
