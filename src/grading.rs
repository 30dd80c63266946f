//! Checks a learner's response against an exercise.
//!
//! Production tasks are open-ended and always count as correct.

use std::collections::BTreeSet;

use crate::normalize::{answers_match, normalize_answer, reorder_matches};
use crate::types::exercise::{Exercise, MatchPair};

/// What the learner handed in, shaped by exercise kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A picked option or typed text.
    Text(String),
    /// Words picked in order for a reorder task.
    Picked(Vec<String>),
    /// Left/right pairs for a matching task.
    Pairs(Vec<MatchPair>),
}

pub fn check_answer(exercise: &Exercise, response: &Response) -> bool {
    match (exercise, response) {
        (Exercise::Production { .. }, _) => true,
        (Exercise::MultipleChoice { answer, .. } | Exercise::FillBlank { answer, .. }, Response::Text(given)) => {
            answers_match(given, answer)
        }
        (Exercise::Translation { answer, .. }, Response::Text(given)) => answers_match(given, answer),
        (Exercise::Reorder { answer, .. }, Response::Picked(words)) => reorder_matches(words, answer),
        (Exercise::Reorder { answer, .. }, Response::Text(given)) => answers_match(given, answer),
        (Exercise::MatchPair { pairs, .. }, Response::Pairs(given)) => pair_set(pairs) == pair_set(given),
        _ => false,
    }
}

fn pair_set(pairs: &[MatchPair]) -> BTreeSet<(String, String)> {
    pairs
        .iter()
        .map(|p| (normalize_answer(&p.left), normalize_answer(&p.right)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::exercise::ProductionMode;

    fn pair(l: &str, r: &str) -> MatchPair {
        MatchPair { left: l.into(), right: r.into() }
    }

    #[test]
    fn choice_answers_ignore_case_and_spacing() {
        let exercise = Exercise::FillBlank {
            prompt: "Ich ___ müde.".into(),
            options: vec!["bin".into(), "bist".into()],
            answer: "bin".into(),
            explanation: None,
        };
        assert!(check_answer(&exercise, &Response::Text(" Bin ".into())));
        assert!(!check_answer(&exercise, &Response::Text("bist".into())));
    }

    #[test]
    fn reorder_compares_joined_words() {
        let exercise = Exercise::Reorder {
            prompt: "Order".into(),
            words: vec!["Ich".into(), "komme".into(), ".".into()],
            answer: "Ich komme.".into(),
            explanation: None,
        };
        fn picked(words: &[&str]) -> Response {
            Response::Picked(words.iter().map(|s| s.to_string()).collect())
        }
        assert!(check_answer(&exercise, &picked(&["Ich", "komme", "."])));
        assert!(!check_answer(&exercise, &picked(&["komme", "Ich", "."])));
    }

    #[test]
    fn pairs_are_order_insensitive() {
        let exercise = Exercise::MatchPair {
            prompt: "Match".into(),
            pairs: vec![pair("eins", "one"), pair("zwei", "two")],
            explanation: None,
        };
        assert!(check_answer(&exercise, &Response::Pairs(vec![pair("zwei", "two"), pair("Eins", "one")])));
        assert!(!check_answer(&exercise, &Response::Pairs(vec![pair("zwei", "one"), pair("eins", "two")])));
    }

    #[test]
    fn production_is_always_correct_and_shapes_must_fit() {
        let production = Exercise::Production {
            prompt: "Talk".into(),
            sample_answer: None,
            mode: ProductionMode::Speaking,
            explanation: None,
        };
        assert!(check_answer(&production, &Response::Text(String::new())));

        let translation = Exercise::Translation { prompt: "t".into(), answer: "Hallo".into(), explanation: None };
        assert!(!check_answer(&translation, &Response::Picked(vec!["Hallo".into()])));
    }
}
