//*** START FILE: src/types/lesson_data.rs ***//
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::exercise::Exercise;

/// The learner's stated reason for learning. Intake also offers "other",
/// which never survives past [`PurposeTrack::from_intake`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PurposeTrack {
    Work,
    Travel,
    Study,
    Relocation,
    Exams,
    Daily,
}

impl PurposeTrack {
    pub const ALL: [PurposeTrack; 6] = [
        PurposeTrack::Work,
        PurposeTrack::Travel,
        PurposeTrack::Study,
        PurposeTrack::Relocation,
        PurposeTrack::Exams,
        PurposeTrack::Daily,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PurposeTrack::Work => "work",
            PurposeTrack::Travel => "travel",
            PurposeTrack::Study => "study",
            PurposeTrack::Relocation => "relocation",
            PurposeTrack::Exams => "exams",
            PurposeTrack::Daily => "daily",
        }
    }

    /// Maps a raw intake answer onto a track. "other", blanks and anything
    /// unrecognised all land on `Daily`.
    pub fn from_intake(raw: &str) -> PurposeTrack {
        raw.parse().unwrap_or(PurposeTrack::Daily)
    }
}

impl fmt::Display for PurposeTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurposeTrack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().to_lowercase();
        PurposeTrack::ALL
            .into_iter()
            .find(|track| track.as_str() == cleaned)
            .ok_or_else(|| format!("unknown purpose track '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
}

impl CefrLevel {
    pub fn is_beginner(self) -> bool {
        matches!(self, CefrLevel::A1 | CefrLevel::A2)
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
        };
        f.write_str(label)
    }
}

/// Minutes per session the learner committed to. Only these tiers exist.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeCommitment {
    #[serde(rename = "5")]
    Minutes5,
    #[serde(rename = "10")]
    Minutes10,
    #[serde(rename = "20")]
    Minutes20,
    #[serde(rename = "45")]
    Minutes45,
}

impl TimeCommitment {
    pub const ALL: [TimeCommitment; 4] = [
        TimeCommitment::Minutes5,
        TimeCommitment::Minutes10,
        TimeCommitment::Minutes20,
        TimeCommitment::Minutes45,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            TimeCommitment::Minutes5 => 5,
            TimeCommitment::Minutes10 => 10,
            TimeCommitment::Minutes20 => 20,
            TimeCommitment::Minutes45 => 45,
        }
    }

    pub fn is_short(self) -> bool {
        matches!(self, TimeCommitment::Minutes5 | TimeCommitment::Minutes10)
    }
}

impl FromStr for TimeCommitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5" => Ok(TimeCommitment::Minutes5),
            "10" => Ok(TimeCommitment::Minutes10),
            "20" => Ok(TimeCommitment::Minutes20),
            "45" => Ok(TimeCommitment::Minutes45),
            other => Err(format!("unknown time commitment '{}' (expected 5, 10, 20 or 45)", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Speaking,
    Grammar,
    Vocab,
    Balanced,
}

impl LearningStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LearningStyle::Speaking => "speaking",
            LearningStyle::Grammar => "grammar",
            LearningStyle::Vocab => "vocab",
            LearningStyle::Balanced => "balanced",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speaking" => Ok(LearningStyle::Speaking),
            "grammar" => Ok(LearningStyle::Grammar),
            "vocab" => Ok(LearningStyle::Vocab),
            "balanced" => Ok(LearningStyle::Balanced),
            _ => Err(format!("unknown learning style '{}'", s)),
        }
    }
}

/// Everything a builder needs to know about the learner. Passed explicitly
/// to every call; nothing in the crate reads learner state on its own.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyOptions {
    #[serde(default)]
    pub purpose: Option<PurposeTrack>,
    #[serde(default)]
    pub time_commitment: Option<TimeCommitment>,
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
}

impl AssemblyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from raw intake answers. Unknown time tiers and
    /// styles are dropped (treated as "not stated").
    pub fn from_intake(purpose: Option<&str>, time: Option<&str>, style: Option<&str>) -> Self {
        AssemblyOptions {
            purpose: purpose.map(PurposeTrack::from_intake),
            time_commitment: time.and_then(|t| t.parse().ok()),
            learning_style: style.and_then(|s| s.parse().ok()),
        }
    }

    pub fn with_purpose(mut self, purpose: PurposeTrack) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn with_time(mut self, time: TimeCommitment) -> Self {
        self.time_commitment = Some(time);
        self
    }

    pub fn with_style(mut self, style: LearningStyle) -> Self {
        self.learning_style = Some(style);
        self
    }

    pub fn resolved_purpose(&self) -> PurposeTrack {
        self.purpose.unwrap_or(PurposeTrack::Daily)
    }

    pub fn is_short_session(&self) -> bool {
        self.time_commitment.is_some_and(TimeCommitment::is_short)
    }

    pub fn speaking_priority(&self) -> bool {
        self.learning_style == Some(LearningStyle::Speaking)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct GrammarPoint {
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<String>>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VocabItem {
    pub german: String,
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueLine {
    pub speaker: String,
    pub german: String,
    pub english: String,
}

/// A fully assembled lesson. Built fresh on every call and never cached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LessonContent {
    pub id: String,
    pub title: String,
    pub level: CefrLevel,
    pub purpose: PurposeTrack,
    pub prerequisites: Vec<String>,
    pub objective: String,
    pub grammar_focus: String,
    pub grammar: Vec<GrammarPoint>,
    pub vocabulary: Vec<VocabItem>,
    pub dialogue: Vec<DialogueLine>,
    pub exercises: Vec<Exercise>,
    pub skill_unlock: String,
    pub review_suggestion: String,
}

//*** END FILE: src/types/lesson_data.rs ***//
