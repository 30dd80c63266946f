//! Content compiled into the binary, so the library works without a
//! content directory.

use super::lesson_parser::{ContentSources, SourceFile};

const CATALOG: &str = include_str!("../../data/catalog.toml");
const PURPOSES: &str = include_str!("../../data/purposes.toml");

const LESSONS: &[(&str, &str)] = &[
    ("greetings-intro.toml", include_str!("../../data/lessons/greetings-intro.toml")),
    ("numbers-time.toml", include_str!("../../data/lessons/numbers-time.toml")),
    ("articles-nouns.toml", include_str!("../../data/lessons/articles-nouns.toml")),
    ("present-tense.toml", include_str!("../../data/lessons/present-tense.toml")),
    ("questions.toml", include_str!("../../data/lessons/questions.toml")),
    ("modal-verbs.toml", include_str!("../../data/lessons/modal-verbs.toml")),
    ("accusative-case.toml", include_str!("../../data/lessons/accusative-case.toml")),
    ("separable-verbs.toml", include_str!("../../data/lessons/separable-verbs.toml")),
    ("perfect-tense.toml", include_str!("../../data/lessons/perfect-tense.toml")),
    ("dative-prepositions.toml", include_str!("../../data/lessons/dative-prepositions.toml")),
    ("subordinate-clauses.toml", include_str!("../../data/lessons/subordinate-clauses.toml")),
    ("formal-requests.toml", include_str!("../../data/lessons/formal-requests.toml")),
];

pub fn sources() -> ContentSources {
    ContentSources {
        catalog: SourceFile::new("catalog.toml", CATALOG),
        purposes: SourceFile::new("purposes.toml", PURPOSES),
        lessons: LESSONS.iter().map(|(name, text)| SourceFile::new(*name, *text)).collect(),
    }
}
