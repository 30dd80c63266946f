//! Checks every assembled lesson must pass regardless of style.

use crate::normalize::reorder_matches;
use crate::types::exercise::Exercise;
use crate::types::lesson_data::LessonContent;

use super::{FindingSink, Severity};

/// Verbs that mark a title as an ability ("what you can do").
pub const ABILITY_VERBS: &[&str] = &[
    "introduce", "greet", "ask", "answer", "talk", "tell", "say", "describe", "order", "buy", "book",
    "count", "name", "understand", "make", "give", "explain", "write", "read", "plan", "arrange",
    "follow", "find", "request", "handle", "discuss", "share", "report", "present", "compare", "check",
    "agree", "express", "navigate", "get",
];

/// Words that mark a title as a grammar label.
pub const GRAMMAR_KEYWORDS: &[&str] = &[
    "verb", "verbs", "tense", "case", "article", "articles", "noun", "nouns", "pronoun", "pronouns",
    "preposition", "prepositions", "clause", "clauses", "conjugation", "declension", "accusative",
    "dative", "genitive", "nominative", "modal", "modals", "perfekt", "präteritum", "konjunktiv",
    "subjunctive", "passive", "separable", "plural", "adjective",
];

fn title_words(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A title reads like a grammar label when it names a grammar topic and no
/// ability.
pub fn is_grammar_labeled(title: &str) -> bool {
    let words = title_words(title);
    let has_ability = words.iter().any(|w| ABILITY_VERBS.contains(&w.as_str()));
    let has_grammar = words.iter().any(|w| GRAMMAR_KEYWORDS.contains(&w.as_str()));
    !has_ability && has_grammar
}

pub(super) fn check_content(content: &LessonContent, location: &str, sink: &mut FindingSink) {
    if content.title.trim().is_empty() {
        sink.push(Severity::Error, location, "title is empty");
    } else if is_grammar_labeled(&content.title) {
        sink.push(
            Severity::Error,
            location,
            format!("title \"{}\" names grammar instead of an ability", content.title),
        );
    }
    if content.objective.trim().is_empty() {
        sink.push(Severity::Error, location, "ability objective is empty");
    }
    if content.exercises.is_empty() {
        sink.push(Severity::Error, location, "lesson has no exercises");
    }

    for (idx, exercise) in content.exercises.iter().enumerate() {
        let at = format!("{} exercise #{} ({})", location, idx + 1, exercise.kind());
        check_exercise(exercise, &at, sink);
    }
}

fn check_exercise(exercise: &Exercise, at: &str, sink: &mut FindingSink) {
    if exercise.prompt().trim().is_empty() {
        sink.push(Severity::Error, at, "prompt is empty");
    }

    if let Exercise::Production { sample_answer, .. } = exercise {
        // The mode is a closed enum; bad values fail at load time.
        if sample_answer.as_deref().map_or(true, |s| s.trim().is_empty()) {
            sink.push(Severity::Warning, at, "production task has no sample answer");
        }
        return;
    }
    if exercise.answer().trim().is_empty() {
        sink.push(Severity::Error, at, "answer is empty");
    }

    match exercise {
        Exercise::MultipleChoice { options, answer, .. } | Exercise::FillBlank { options, answer, .. } => {
            if options.len() < 2 {
                sink.push(Severity::Error, at, format!("needs at least 2 options, has {}", options.len()));
            }
            if !options.contains(answer) {
                sink.push(Severity::Error, at, format!("answer \"{}\" is not among the options", answer));
            }
        }
        Exercise::Reorder { words, answer, .. } => {
            if words.len() < 2 {
                sink.push(Severity::Error, at, format!("needs at least 2 words, has {}", words.len()));
            }
            if !reorder_matches(words, answer) {
                sink.push(
                    Severity::Warning,
                    at,
                    format!("words joined as \"{}\" do not spell answer \"{}\"", words.join(" "), answer),
                );
            }
        }
        _ => {}
    }
}
