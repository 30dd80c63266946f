//! Style- and purpose-specific business rules.

use crate::assembly::GRAMMAR_SNAPSHOT_MARKER;
use crate::types::exercise::{Exercise, ProductionMode};
use crate::types::lesson_data::{LearningStyle, LessonContent, PurposeTrack};

use super::{FindingSink, Severity};

pub(super) fn check_rules(content: &LessonContent, style: LearningStyle, location: &str, sink: &mut FindingSink) {
    match style {
        LearningStyle::Speaking => {
            let has_spoken_task = content
                .exercises
                .iter()
                .any(|e| matches!(e, Exercise::Production { mode: ProductionMode::Speaking, .. }));
            if !has_spoken_task {
                sink.push(Severity::Error, location, "speaking style needs a production task in speaking mode");
            }
        }
        LearningStyle::Grammar => {
            let has_snapshot = content
                .grammar
                .iter()
                .any(|point| point.explanation.contains(GRAMMAR_SNAPSHOT_MARKER));
            if !has_snapshot {
                sink.push(Severity::Warning, location, "grammar style is missing the grammar snapshot");
            }
        }
        LearningStyle::Vocab | LearningStyle::Balanced => {}
    }

    if content.purpose == PurposeTrack::Exams {
        let has_timed = content
            .exercises
            .iter()
            .any(|e| e.prompt().to_lowercase().contains("timed"));
        if !has_timed {
            sink.push(Severity::Warning, location, "exam lesson has no timed exercise");
        }
    }
}
