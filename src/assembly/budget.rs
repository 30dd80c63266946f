//! Trims an assembled lesson to the learner's time budget and style.

use crate::types::exercise::ExerciseKind;
use crate::types::lesson_data::{AssemblyOptions, LessonContent};

pub const SHORT_DIALOGUE_LINES: usize = 2;
pub const SHORT_EXERCISES: usize = 3;
pub const SHORT_VOCABULARY: usize = 6;
pub const BEGINNER_VOCABULARY: usize = 12;
pub const ADVANCED_VOCABULARY: usize = 15;

/// Applies the budget rules in order: dialogue, then exercises, then
/// vocabulary.
///
/// In a short session the exercise kind least aligned with the learner's
/// style goes first: speaking learners lose reorder tasks, everyone else
/// loses production tasks. At most three exercises remain after that.
pub fn apply_budget(mut content: LessonContent, options: &AssemblyOptions) -> LessonContent {
    let short = options.is_short_session();

    if short {
        content.dialogue.truncate(SHORT_DIALOGUE_LINES);

        let dropped = if options.speaking_priority() {
            ExerciseKind::Reorder
        } else {
            ExerciseKind::Production
        };
        content.exercises.retain(|exercise| exercise.kind() != dropped);
        content.exercises.truncate(SHORT_EXERCISES);
    }

    let vocabulary_cap = if short {
        SHORT_VOCABULARY
    } else if content.level.is_beginner() {
        BEGINNER_VOCABULARY
    } else {
        ADVANCED_VOCABULARY
    };
    content.vocabulary.truncate(vocabulary_cap);

    content
}
