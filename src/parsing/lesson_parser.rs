//*** START FILE: src/parsing/lesson_parser.rs ***//
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::{LessonCatalogItem, PurposeFlavor};
use crate::error::LibraryError;
use crate::types::authoring::{ContextTemplate, LessonContext};
use crate::types::exercise::Exercise;
use crate::types::lesson_data::{GrammarPoint, PurposeTrack};

/// One named TOML document, either compiled in or read from disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile { name: name.into(), text: text.into() }
    }

    fn read(path: &Path) -> Result<Self, LibraryError> {
        let text = fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(SourceFile { name, text })
    }
}

/// The raw documents a lesson library is built from.
#[derive(Debug, Clone)]
pub struct ContentSources {
    pub catalog: SourceFile,
    pub purposes: SourceFile,
    pub lessons: Vec<SourceFile>,
}

impl ContentSources {
    /// Reads `catalog.toml`, `purposes.toml` and every `lessons/*.toml`
    /// under `dir`. Lesson files are taken in file-name order.
    pub fn from_dir(dir: &Path) -> Result<Self, LibraryError> {
        let catalog = SourceFile::read(&dir.join("catalog.toml"))?;
        let purposes = SourceFile::read(&dir.join("purposes.toml"))?;

        let lessons_dir = dir.join("lessons");
        let entries = fs::read_dir(&lessons_dir).map_err(|source| LibraryError::Io {
            path: lessons_dir.clone(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LibraryError::Io { path: lessons_dir.clone(), source })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let lessons = paths.iter().map(|p| SourceFile::read(p)).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(dir = %dir.display(), lessons = lessons.len(), "read content directory");
        Ok(ContentSources { catalog, purposes, lessons })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(rename = "lesson", default)]
    pub lessons: Vec<LessonCatalogItem>,
    #[serde(default)]
    pub practice: PracticeSection,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PracticeSection {
    #[serde(default)]
    pub lessons: Vec<String>,
}

/// One `lessons/<id>.toml` document, before schema checks.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LessonFile {
    pub id: String,
    pub grammar_focus: String,
    #[serde(default)]
    pub grammar: Vec<GrammarPoint>,
    pub snapshot: String,
    #[serde(default)]
    pub template: Option<ContextTemplate>,
    #[serde(default)]
    pub contexts: BTreeMap<String, LessonContext>,
    #[serde(rename = "exercise", default)]
    pub exercises: Vec<Exercise>,
}

fn parse_toml<T: for<'de> Deserialize<'de>>(source: &SourceFile) -> Result<T, LibraryError> {
    toml::from_str(&source.text).map_err(|e| LibraryError::Toml {
        file: source.name.clone(),
        source: e,
    })
}

pub fn parse_catalog(source: &SourceFile) -> Result<CatalogFile, LibraryError> {
    let file: CatalogFile = parse_toml(source)?;
    if file.lessons.is_empty() {
        tracing::warn!(file = %source.name, "catalog declares no lessons");
    }
    Ok(file)
}

pub fn parse_purposes(source: &SourceFile) -> Result<BTreeMap<PurposeTrack, PurposeFlavor>, LibraryError> {
    let raw: BTreeMap<String, PurposeFlavor> = parse_toml(source)?;
    raw.into_iter()
        .map(|(key, flavor)| -> Result<(PurposeTrack, PurposeFlavor), LibraryError> {
            // "other" is an intake answer, never a table key.
            let track = key.parse::<PurposeTrack>().map_err(|_| LibraryError::UnknownPurpose {
                file: source.name.clone(),
                value: key.clone(),
            })?;
            Ok((track, flavor))
        })
        .collect()
}

/// Parses a lesson document and resolves its context table keys.
pub fn parse_lesson(source: &SourceFile) -> Result<(LessonFile, BTreeMap<PurposeTrack, LessonContext>), LibraryError> {
    let mut file: LessonFile = parse_toml(source)?;
    let expected_name = format!("{}.toml", file.id);
    if source.name != expected_name && source.name.ends_with(".toml") {
        tracing::warn!(file = %source.name, id = %file.id, "lesson file name does not match its id");
    }

    let mut contexts = BTreeMap::new();
    for (key, context) in std::mem::take(&mut file.contexts) {
        let track = key.parse::<PurposeTrack>().map_err(|_| LibraryError::UnknownPurpose {
            file: source.name.clone(),
            value: key.clone(),
        })?;
        contexts.insert(track, context);
    }
    Ok((file, contexts))
}

//*** END FILE: src/parsing/lesson_parser.rs ***//
