//! Archive policy
//!
//! One archivable invariant, one place: `archived == true` exactly when an
//! archive timestamp is present. Callers routinely set the flag without
//! the timestamp (or vice versa), so every write path runs the candidate
//! state through `ensure_integrity` instead of trusting it. The functions
//! here are pure; the assertion wrappers are the only ones that can fail,
//! and they fail with a typed, entity-kind-labelled error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::EntityKind;

/// Archive flag and timestamp pair embedded in every archivable entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveState {
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl ArchiveState {
    /// True iff the flag and the timestamp agree
    pub fn is_consistent(&self) -> bool {
        self.archived == self.archived_at.is_some()
    }

    /// Repair the pair in place: an archived state without a timestamp is
    /// stamped now; a non-archived state loses any stray timestamp.
    /// Idempotent.
    pub fn normalize(&mut self) {
        if self.archived {
            if self.archived_at.is_none() {
                self.archived_at = Some(Utc::now());
            }
        } else {
            self.archived_at = None;
        }
    }

    /// Mark archived, stamping the timestamp
    pub fn archive(&mut self) {
        self.archived = true;
        self.normalize();
    }

    /// Clear the archived state
    pub fn unarchive(&mut self) {
        self.archived = false;
        self.archived_at = None;
    }
}

/// A domain entity supporting the reversible archived state
pub trait Archivable {
    fn archive_state(&self) -> &ArchiveState;
    fn archive_state_mut(&mut self) -> &mut ArchiveState;
    fn kind(&self) -> EntityKind;
}

/// Violations of the archive policy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArchivePolicyError {
    #[error("{kind} is archived and cannot be modified; unarchive it first")]
    Immutable { kind: EntityKind },

    #[error("{kind} is archived; content generation is blocked for archived records")]
    GenerationBlocked { kind: EntityKind },

    #[error("{kind} has an inconsistent archive state: the archived flag and timestamp disagree")]
    InconsistentState { kind: EntityKind },
}

/// Whether the entity is archived
pub fn is_archived<T: Archivable>(entity: &T) -> bool {
    entity.archive_state().archived
}

/// Archived entities are read-only
pub fn can_be_modified<T: Archivable>(entity: &T) -> bool {
    !is_archived(entity)
}

/// Generation is governed by the same predicate as modification; the
/// separate name keeps call sites readable
pub fn can_generate_for<T: Archivable>(entity: &T) -> bool {
    !is_archived(entity)
}

/// True iff the archived/archived_at invariant holds exactly
pub fn validate_integrity<T: Archivable>(entity: &T) -> bool {
    entity.archive_state().is_consistent()
}

/// Return a corrected copy satisfying the invariant
///
/// The single chokepoint all writes pass through: never fails, always
/// yields a law-abiding value, and applying it twice equals applying it
/// once — safe to call defensively on read paths too.
pub fn ensure_integrity<T: Archivable + Clone>(entity: &T) -> T {
    let mut repaired = entity.clone();
    repaired.archive_state_mut().normalize();
    repaired
}

/// Fail with a typed error if the entity is archived
pub fn assert_can_be_modified<T: Archivable>(entity: &T) -> Result<(), ArchivePolicyError> {
    if can_be_modified(entity) {
        Ok(())
    } else {
        Err(ArchivePolicyError::Immutable {
            kind: entity.kind(),
        })
    }
}

/// Fail with a typed error if generation is requested for an archived
/// entity
pub fn assert_can_generate_for<T: Archivable>(entity: &T) -> Result<(), ArchivePolicyError> {
    if can_generate_for(entity) {
        Ok(())
    } else {
        Err(ArchivePolicyError::GenerationBlocked {
            kind: entity.kind(),
        })
    }
}

/// Fail with a typed error if the invariant does not hold
pub fn assert_archive_integrity<T: Archivable>(entity: &T) -> Result<(), ArchivePolicyError> {
    if validate_integrity(entity) {
        Ok(())
    } else {
        Err(ArchivePolicyError::InconsistentState {
            kind: entity.kind(),
        })
    }
}
