use serde::{Deserialize, Serialize};

use super::lesson_data::{DialogueLine, VocabItem};

/// The purpose-specific half of a lesson: everything that changes when the
/// learner's purpose changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LessonContext {
    pub title: String,
    pub objective: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabItem>,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    pub production_prompt: String,
    pub production_sample: String,
    pub skill_unlock: String,
    pub review: String,
}

/// A context written once with `{placeholder}` slots and rendered per
/// purpose from the purpose table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContextTemplate {
    #[serde(flatten)]
    pub context: LessonContext,
    /// Append the purpose's recurring nouns after the lesson's own words.
    #[serde(default)]
    pub include_nouns: bool,
}

impl LessonContext {
    /// Authored text in field order, for placeholder and emptiness checks.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = vec![self.title.as_str(), self.objective.as_str()];
        for item in &self.vocabulary {
            out.push(&item.german);
            out.push(&item.english);
            out.extend(item.example.as_deref());
        }
        for line in &self.dialogue {
            out.push(&line.speaker);
            out.push(&line.german);
            out.push(&line.english);
        }
        out.extend([
            self.production_prompt.as_str(),
            self.production_sample.as_str(),
            self.skill_unlock.as_str(),
            self.review.as_str(),
        ]);
        out
    }

    pub fn map_text<F: Fn(&str) -> String>(&self, f: F) -> LessonContext {
        LessonContext {
            title: f(&self.title),
            objective: f(&self.objective),
            vocabulary: self
                .vocabulary
                .iter()
                .map(|item| VocabItem {
                    german: f(&item.german),
                    english: f(&item.english),
                    example: item.example.as_deref().map(&f),
                })
                .collect(),
            dialogue: self
                .dialogue
                .iter()
                .map(|line| DialogueLine {
                    speaker: f(&line.speaker),
                    german: f(&line.german),
                    english: f(&line.english),
                })
                .collect(),
            production_prompt: f(&self.production_prompt),
            production_sample: f(&self.production_sample),
            skill_unlock: f(&self.skill_unlock),
            review: f(&self.review),
        }
    }
}
