//*** START FILE: src/practice.rs ***//
use serde::{Serialize, Serializer};
use std::borrow::Cow;

use crate::assembly::LessonLibrary;
use crate::types::exercise::{Exercise, ExerciseKind};
use crate::types::lesson_data::AssemblyOptions;

/// One entry of the practice pool, tagged with the lesson it came from.
/// Serialized records always carry an `answer`, including kinds whose
/// answer is derived rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeExercise {
    pub id: String,
    pub lesson_id: String,
    pub lesson_title: String,
    pub exercise: Exercise,
}

impl Serialize for PracticeExercise {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Record<'a> {
            id: &'a str,
            lesson_id: &'a str,
            lesson_title: &'a str,
            #[serde(flatten)]
            exercise: &'a Exercise,
            #[serde(skip_serializing_if = "Option::is_none")]
            answer: Option<Cow<'a, str>>,
        }

        let derived = matches!(self.exercise, Exercise::MatchPair { .. } | Exercise::Production { .. });
        Record {
            id: &self.id,
            lesson_id: &self.lesson_id,
            lesson_title: &self.lesson_title,
            exercise: &self.exercise,
            answer: derived.then(|| self.exercise.answer()),
        }
        .serialize(serializer)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LessonName {
    pub id: String,
    pub title: String,
}

/// Every non-production exercise from the practice-pool lessons, assembled
/// for `options`, in pool order. Ids are `<lesson>-<position>` where the
/// position counts from 1 within the assembled lesson.
pub fn all_practice_exercises(library: &LessonLibrary, options: &AssemblyOptions) -> Vec<PracticeExercise> {
    let mut pool = Vec::new();
    for lesson_id in library.catalog().practice_lessons() {
        let Some(content) = library.lesson_content(lesson_id, options) else {
            tracing::warn!(lesson = %lesson_id, "practice pool names a lesson that is not in the catalog");
            continue;
        };
        for (idx, exercise) in content.exercises.into_iter().enumerate() {
            if exercise.kind() == ExerciseKind::Production {
                continue;
            }
            pool.push(PracticeExercise {
                id: format!("{}-{}", lesson_id, idx + 1),
                lesson_id: lesson_id.clone(),
                lesson_title: content.title.clone(),
                exercise,
            });
        }
    }
    pool
}

/// Display titles for every catalog lesson as `options` would show them.
pub fn lesson_names(library: &LessonLibrary, options: &AssemblyOptions) -> Vec<LessonName> {
    library
        .catalog()
        .ids()
        .filter_map(|id| {
            library.lesson_content(id, options).map(|content| LessonName {
                id: id.to_string(),
                title: content.title,
            })
        })
        .collect()
}
//*** END FILE: src/practice.rs ***//
