//*** START FILE: src/normalize.rs ***//
use regex::Regex;
use std::sync::LazyLock;

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").expect("valid pattern"));
static AFTER_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.,!?;:])\s*").expect("valid pattern"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Canonical form used to compare typed answers: lowercase, no space before
/// `. , ! ? ; :`, exactly one space after them, single spaces elsewhere.
///
/// `normalize_answer("Ich  komme , jetzt !") == "ich komme, jetzt!"`
pub fn normalize_answer(input: &str) -> String {
    let lowered = input.to_lowercase();
    let trimmed = lowered.trim();
    let tightened = SPACE_BEFORE_PUNCT.replace_all(trimmed, "$1");
    let spaced = AFTER_PUNCT.replace_all(&tightened, "$1 ");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}

pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

/// Whether `words`, read in order and joined by spaces, spell `answer`.
pub fn reorder_matches<S: AsRef<str>>(words: &[S], answer: &str) -> bool {
    let joined = words.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" ");
    answers_match(&joined, answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_spacing_around_punctuation() {
        assert_eq!(normalize_answer("Ich  komme , jetzt !"), "ich komme, jetzt!");
        assert_eq!(normalize_answer("  Wie geht's?Gut.  "), "wie geht's? gut.");
        assert_eq!(normalize_answer("a\t\tb\nc"), "a b c");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn keeps_german_letters() {
        assert_eq!(normalize_answer("ÜBER  Straße"), "über straße");
    }

    #[test]
    fn reorder_join_with_detached_full_stop_matches() {
        assert!(reorder_matches(&["Ich", "komme", "."], "Ich komme."));
        assert!(!reorder_matches(&["komme", "Ich", "."], "Ich komme."));
    }

    #[test]
    fn is_idempotent_on_awkward_input() {
        for s in ["a..b", " , ; ", "x ! ? y", "Hallo,Welt", "::"] {
            let once = normalize_answer(s);
            assert_eq!(normalize_answer(&once), once, "input {s:?}");
        }
    }
}
//*** END FILE: src/normalize.rs ***//
