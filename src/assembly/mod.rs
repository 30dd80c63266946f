//! The assembly pipeline: lesson builder, then budget and style trimming,
//! then the exam-timing pass.

pub mod budget;
pub mod builder;
pub mod postprocess;

use std::collections::HashMap;
use std::path::Path;

use crate::catalog::{Catalog, PurposeTable};
use crate::error::LibraryError;
use crate::parsing::builtin;
use crate::parsing::lesson_parser::{parse_catalog, parse_lesson, parse_purposes, ContentSources};
use crate::types::lesson_data::{AssemblyOptions, LessonContent};

pub use budget::apply_budget;
pub use builder::{LessonDefinition, GRAMMAR_SNAPSHOT_MARKER, REQUIRED_KINDS};
pub use postprocess::{ensure_exam_timing, TIMED_PREFIX};

/// Catalog, purpose table and one builder per catalog lesson, checked
/// against each other at load time. Read-only once built.
#[derive(Debug, Clone)]
pub struct LessonLibrary {
    catalog: Catalog,
    purposes: PurposeTable,
    lessons: HashMap<String, LessonDefinition>,
}

impl LessonLibrary {
    pub fn from_sources(sources: &ContentSources) -> Result<Self, LibraryError> {
        let catalog_file = parse_catalog(&sources.catalog)?;
        let catalog = Catalog::new(catalog_file.lessons, catalog_file.practice.lessons)?;
        let purposes = PurposeTable::new(parse_purposes(&sources.purposes)?)?;

        let mut lessons = HashMap::with_capacity(sources.lessons.len());
        for source in &sources.lessons {
            let (file, authored) = parse_lesson(source)?;
            let entry = catalog
                .get(&file.id)
                .ok_or_else(|| LibraryError::OrphanDefinition(file.id.clone()))?;
            if lessons.contains_key(&file.id) {
                return Err(LibraryError::DuplicateLesson(file.id));
            }
            let definition = LessonDefinition::from_file(file, authored, entry, &purposes)?;
            tracing::debug!(lesson = %definition.id, file = %source.name, "loaded lesson definition");
            lessons.insert(definition.id.clone(), definition);
        }

        if let Some(missing) = catalog.ids().find(|id| !lessons.contains_key(*id)) {
            return Err(LibraryError::MissingDefinition(missing.to_string()));
        }

        tracing::debug!(lessons = lessons.len(), "lesson library ready");
        Ok(LessonLibrary { catalog, purposes, lessons })
    }

    /// The content compiled into the crate.
    pub fn builtin() -> Result<Self, LibraryError> {
        Self::from_sources(&builtin::sources())
    }

    pub fn load_dir(dir: &Path) -> Result<Self, LibraryError> {
        Self::from_sources(&ContentSources::from_dir(dir)?)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn purposes(&self) -> &PurposeTable {
        &self.purposes
    }

    pub fn definition(&self, id: &str) -> Option<&LessonDefinition> {
        self.lessons.get(id)
    }

    /// Assembles lesson `id` for `options`. `None` means the id is not in
    /// the catalog.
    pub fn lesson_content(&self, id: &str, options: &AssemblyOptions) -> Option<LessonContent> {
        let entry = self.catalog.get(id)?;
        let definition = self.lessons.get(id)?;
        let content = definition.build(entry, options, &self.purposes);
        let content = apply_budget(content, options);
        Some(ensure_exam_timing(content))
    }
}
