//! Error types for content loading, configuration and learner snapshots.
//!
//! Looking up a lesson that does not exist is not an error: those calls
//! return `None`.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::exercise::ExerciseKind;
use crate::types::lesson_data::PurposeTrack;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Toml {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate lesson id '{0}' in catalog")]
    DuplicateLesson(String),

    #[error("Lesson '{lesson}' has phase {phase}; phases run from 1 to 3")]
    InvalidPhase { lesson: String, phase: u8 },

    #[error("Lesson '{lesson}' restricts its contexts to an empty set")]
    EmptyContexts { lesson: String },

    #[error("Lesson '{lesson}' lists unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { lesson: String, prerequisite: String },

    #[error("Prerequisite cycle: {}", .cycle.join(" -> "))]
    PrerequisiteCycle { cycle: Vec<String> },

    #[error("Lesson '{lesson}' is declared before its prerequisite '{prerequisite}'")]
    DeclarationOrder { lesson: String, prerequisite: String },

    #[error("Unknown purpose track '{value}' in {file}")]
    UnknownPurpose { file: String, value: String },

    #[error("Purpose table has no entry for '{0}'")]
    MissingFlavor(PurposeTrack),

    #[error("Purpose '{purpose}' does not define phrase '{key}' used by other purposes")]
    FlavorKeyMismatch { purpose: PurposeTrack, key: String },

    #[error("Catalog lesson '{0}' has no lesson definition")]
    MissingDefinition(String),

    #[error("Lesson definition '{0}' has no catalog entry")]
    OrphanDefinition(String),

    #[error("Lesson '{lesson}' must declare exactly one of [template] or [contexts.*] ({found})")]
    ContextSource { lesson: String, found: &'static str },

    #[error("Lesson '{lesson}' has no context for applicable purpose '{purpose}'")]
    MissingContext { lesson: String, purpose: PurposeTrack },

    #[error("Lesson '{lesson}' uses unknown placeholder '{{{key}}}'")]
    UnknownPlaceholder { lesson: String, key: String },

    #[error("Lesson '{lesson}' has no {kind} exercise")]
    MissingExerciseKind { lesson: String, kind: ExerciseKind },

    #[error("Lesson '{lesson}': {field} must not be empty")]
    EmptyField { lesson: String, field: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}. Please ensure it exists.", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile snapshot file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to access profile snapshot at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize profile snapshot at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
