//*** START FILE: src/parsing/mod.rs ***//
pub mod builtin;
pub mod lesson_parser;

// Re-export the entry points the library loader uses
pub use lesson_parser::{parse_catalog, parse_lesson, parse_purposes, ContentSources, SourceFile};
//*** END FILE: src/parsing/mod.rs ***//
