//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod authoring;
    pub mod exercise;
    pub mod lesson_data;
}
pub mod parsing;
pub mod catalog;
pub mod assembly;
pub mod normalize;
pub mod grading;
pub mod practice;
pub mod validation;
pub mod profile;
pub mod profile_io;

// Re-export the items callers reach for most
pub use assembly::LessonLibrary;
pub use catalog::{current_lesson, is_unlocked, Catalog, LessonCatalogItem};
pub use error::{ConfigError, LibraryError, ProfileError};
pub use normalize::normalize_answer;
pub use practice::{all_practice_exercises, lesson_names, LessonName, PracticeExercise};
pub use types::exercise::{Exercise, ExerciseKind, ProductionMode};
pub use types::lesson_data::{
    AssemblyOptions, CefrLevel, LearningStyle, LessonContent, PurposeTrack, TimeCommitment,
};
pub use validation::{Severity, ValidationEngine, ValidationFinding, ValidationReport};

//*** END FILE: src/lib.rs ***//
