//! Domain content records
//!
//! The typed records the intake pipeline produces and the lifecycle
//! services govern. The surrounding dashboard owns richer projections of
//! these; the core keeps only what archive policy, trash snapshots, and
//! audit entries need.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archive::{Archivable, ArchiveState};

/// Known domain entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Discipline,
    ClassGroup,
    LessonPlan,
    Activity,
    SlideDeck,
}

impl EntityKind {
    /// Stable machine identifier (storage keys, persisted columns)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discipline => "discipline",
            Self::ClassGroup => "class_group",
            Self::LessonPlan => "lesson_plan",
            Self::Activity => "activity",
            Self::SlideDeck => "slide_deck",
        }
    }

    /// Parse the machine identifier back into a kind
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "discipline" => Some(Self::Discipline),
            "class_group" => Some(Self::ClassGroup),
            "lesson_plan" => Some(Self::LessonPlan),
            "activity" => Some(Self::Activity),
            "slide_deck" => Some(Self::SlideDeck),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    /// Human-readable label, used in error messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Discipline => "discipline",
            Self::ClassGroup => "class group",
            Self::LessonPlan => "lesson plan",
            Self::Activity => "activity",
            Self::SlideDeck => "slide deck",
        };
        write!(f, "{label}")
    }
}

/// A generated lesson plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPlan {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LessonPlan {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        skills: Vec<String>,
        duration_minutes: Option<u32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            skills,
            duration_minutes,
            archive: ArchiveState::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Archivable for LessonPlan {
    fn archive_state(&self) -> &ArchiveState {
        &self.archive
    }
    fn archive_state_mut(&mut self) -> &mut ArchiveState {
        &mut self.archive
    }
    fn kind(&self) -> EntityKind {
        EntityKind::LessonPlan
    }
}

/// One question inside an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub statement: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: Option<usize>,
    #[serde(default)]
    pub points: Option<f64>,
}

/// A generated activity (quiz)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        title: impl Into<String>,
        instructions: Option<String>,
        skills: Vec<String>,
        questions: Vec<Question>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            instructions,
            skills,
            questions,
            archive: ArchiveState::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Archivable for Activity {
    fn archive_state(&self) -> &ArchiveState {
        &self.archive
    }
    fn archive_state_mut(&mut self) -> &mut ArchiveState {
        &mut self.archive
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Activity
    }
}

/// One slide inside a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A generated slide deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDeck {
    pub id: Uuid,
    pub title: String,
    pub slides: Vec<Slide>,
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SlideDeck {
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slides,
            archive: ArchiveState::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Archivable for SlideDeck {
    fn archive_state(&self) -> &ArchiveState {
        &self.archive
    }
    fn archive_state_mut(&mut self) -> &mut ArchiveState {
        &mut self.archive
    }
    fn kind(&self) -> EntityKind {
        EntityKind::SlideDeck
    }
}
