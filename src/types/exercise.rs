use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    MultipleChoice,
    FillBlank,
    Reorder,
    Translation,
    MatchPair,
    Production,
}

impl ExerciseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::MultipleChoice => "multiple-choice",
            ExerciseKind::FillBlank => "fill-blank",
            ExerciseKind::Reorder => "reorder",
            ExerciseKind::Translation => "translation",
            ExerciseKind::MatchPair => "match-pair",
            ExerciseKind::Production => "production",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a production task is answered aloud or in writing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductionMode {
    Speaking,
    #[default]
    Writing,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// One exercise. Each kind carries exactly the fields it needs, so a
/// reorder task cannot be missing its words or carry stray options.
///
/// Production tasks are authored without prompt or sample: the builder
/// fills both from the lesson's purpose context.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Exercise {
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    FillBlank {
        prompt: String,
        options: Vec<String>,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    Reorder {
        prompt: String,
        words: Vec<String>,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    Translation {
        prompt: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    MatchPair {
        prompt: String,
        pairs: Vec<MatchPair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    Production {
        #[serde(default)]
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sample_answer: Option<String>,
        #[serde(default)]
        mode: ProductionMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
}

impl Exercise {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Exercise::MultipleChoice { .. } => ExerciseKind::MultipleChoice,
            Exercise::FillBlank { .. } => ExerciseKind::FillBlank,
            Exercise::Reorder { .. } => ExerciseKind::Reorder,
            Exercise::Translation { .. } => ExerciseKind::Translation,
            Exercise::MatchPair { .. } => ExerciseKind::MatchPair,
            Exercise::Production { .. } => ExerciseKind::Production,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Exercise::MultipleChoice { prompt, .. }
            | Exercise::FillBlank { prompt, .. }
            | Exercise::Reorder { prompt, .. }
            | Exercise::Translation { prompt, .. }
            | Exercise::MatchPair { prompt, .. }
            | Exercise::Production { prompt, .. } => prompt,
        }
    }

    /// The canonical answer. Match-pair tasks derive theirs from the pairs;
    /// production tasks have none.
    pub fn answer(&self) -> Cow<'_, str> {
        match self {
            Exercise::MultipleChoice { answer, .. }
            | Exercise::FillBlank { answer, .. }
            | Exercise::Reorder { answer, .. }
            | Exercise::Translation { answer, .. } => Cow::Borrowed(answer),
            Exercise::MatchPair { pairs, .. } => Cow::Owned(
                pairs
                    .iter()
                    .map(|p| format!("{} = {}", p.left, p.right))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Exercise::Production { .. } => Cow::Borrowed(""),
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Exercise::MultipleChoice { explanation, .. }
            | Exercise::FillBlank { explanation, .. }
            | Exercise::Reorder { explanation, .. }
            | Exercise::Translation { explanation, .. }
            | Exercise::MatchPair { explanation, .. }
            | Exercise::Production { explanation, .. } => explanation.as_deref(),
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            Exercise::MultipleChoice { options, .. } | Exercise::FillBlank { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn with_prompt(mut self, new_prompt: String) -> Self {
        match &mut self {
            Exercise::MultipleChoice { prompt, .. }
            | Exercise::FillBlank { prompt, .. }
            | Exercise::Reorder { prompt, .. }
            | Exercise::Translation { prompt, .. }
            | Exercise::MatchPair { prompt, .. }
            | Exercise::Production { prompt, .. } => *prompt = new_prompt,
        }
        self
    }

    /// Every piece of authored text in the exercise, in field order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![self.prompt()];
        match self {
            Exercise::MultipleChoice { options, answer, .. }
            | Exercise::FillBlank { options, answer, .. } => {
                out.extend(options.iter().map(String::as_str));
                out.push(answer);
            }
            Exercise::Reorder { words, answer, .. } => {
                out.extend(words.iter().map(String::as_str));
                out.push(answer);
            }
            Exercise::Translation { answer, .. } => out.push(answer),
            Exercise::MatchPair { pairs, .. } => {
                for pair in pairs {
                    out.push(&pair.left);
                    out.push(&pair.right);
                }
            }
            Exercise::Production { sample_answer, .. } => out.extend(sample_answer.as_deref()),
        }
        out.extend(self.explanation());
        out
    }

    /// Rewrites every piece of authored text through `f`.
    pub fn map_text<F: Fn(&str) -> String>(self, f: F) -> Self {
        let map_vec = |v: Vec<String>| v.iter().map(|s| f(s)).collect::<Vec<_>>();
        let map_opt = |o: Option<String>| o.as_deref().map(&f);
        match self {
            Exercise::MultipleChoice { prompt, options, answer, explanation } => Exercise::MultipleChoice {
                prompt: f(&prompt),
                options: map_vec(options),
                answer: f(&answer),
                explanation: map_opt(explanation),
            },
            Exercise::FillBlank { prompt, options, answer, explanation } => Exercise::FillBlank {
                prompt: f(&prompt),
                options: map_vec(options),
                answer: f(&answer),
                explanation: map_opt(explanation),
            },
            Exercise::Reorder { prompt, words, answer, explanation } => Exercise::Reorder {
                prompt: f(&prompt),
                words: map_vec(words),
                answer: f(&answer),
                explanation: map_opt(explanation),
            },
            Exercise::Translation { prompt, answer, explanation } => Exercise::Translation {
                prompt: f(&prompt),
                answer: f(&answer),
                explanation: map_opt(explanation),
            },
            Exercise::MatchPair { prompt, pairs, explanation } => Exercise::MatchPair {
                prompt: f(&prompt),
                pairs: pairs
                    .into_iter()
                    .map(|p| MatchPair { left: f(&p.left), right: f(&p.right) })
                    .collect(),
                explanation: map_opt(explanation),
            },
            Exercise::Production { prompt, sample_answer, mode, explanation } => Exercise::Production {
                prompt: f(&prompt),
                sample_answer: map_opt(sample_answer),
                mode,
                explanation: map_opt(explanation),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_deserialize_from_kebab_case_tags() {
        let exercise: Exercise = toml::from_str(
            r#"
            kind = "fill-blank"
            prompt = "Ich ___ Anna."
            options = ["heiße", "heißt"]
            answer = "heiße"
            "#,
        )
        .unwrap();
        assert_eq!(exercise.kind(), ExerciseKind::FillBlank);
        assert_eq!(exercise.options().map(<[String]>::len), Some(2));
        assert_eq!(exercise.explanation(), None);
    }

    #[test]
    fn production_defaults_to_writing_with_empty_prompt() {
        let exercise: Exercise = toml::from_str(r#"kind = "production""#).unwrap();
        assert_eq!(
            exercise,
            Exercise::Production {
                prompt: String::new(),
                sample_answer: None,
                mode: ProductionMode::Writing,
                explanation: None,
            }
        );
        assert_eq!(exercise.answer(), "");
    }

    #[test]
    fn match_pair_answer_is_derived_from_pairs() {
        let exercise = Exercise::MatchPair {
            prompt: "Match".into(),
            pairs: vec![
                MatchPair { left: "Hallo".into(), right: "Hello".into() },
                MatchPair { left: "Tschüss".into(), right: "Bye".into() },
            ],
            explanation: None,
        };
        assert_eq!(exercise.answer(), "Hallo = Hello; Tschüss = Bye");
    }

    #[test]
    fn map_text_reaches_every_field() {
        let exercise = Exercise::Reorder {
            prompt: "p".into(),
            words: vec!["a".into(), "b".into()],
            answer: "a b".into(),
            explanation: Some("e".into()),
        };
        let upper = exercise.map_text(|s| s.to_uppercase());
        assert_eq!(upper.texts(), vec!["P", "A", "B", "A B", "E"]);
    }
}
