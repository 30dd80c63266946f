use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::lesson_data::AssemblyOptions;

/// What the learner told us at intake plus the lessons they finished.
/// Values are kept as raw intake strings; [`LearnerProfile::assembly_options`]
/// normalises them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnerProfile {
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub time_commitment: Option<String>,
    #[serde(default)]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub completed_lessons: Vec<String>,
}

impl LearnerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions::from_intake(
            self.purpose.as_deref(),
            self.time_commitment.as_deref(),
            self.learning_style.as_deref(),
        )
    }

    pub fn completed_set(&self) -> HashSet<String> {
        self.completed_lessons.iter().cloned().collect()
    }

    /// Marks a lesson finished. Returns false if it already was.
    pub fn record_completion(&mut self, lesson_id: &str) -> bool {
        if self.completed_lessons.iter().any(|id| id == lesson_id) {
            return false;
        }
        self.completed_lessons.push(lesson_id.to_string());
        true
    }
}
