use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::error::LibraryError;
use crate::types::lesson_data::{PurposeTrack, VocabItem};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").expect("placeholder pattern is valid"));

/// Flavor data for one purpose track: named phrases for `{placeholder}`
/// interpolation and the recurring nouns templated lessons may append.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PurposeFlavor {
    pub label: String,
    #[serde(default)]
    pub phrases: BTreeMap<String, String>,
    #[serde(default)]
    pub nouns: Vec<VocabItem>,
}

impl PurposeFlavor {
    /// Replaces every `{key}` with its phrase. Unknown keys stay as written;
    /// the loader rejects them before any lesson is built.
    pub fn interpolate(&self, text: &str) -> String {
        if !text.contains('{') {
            return text.to_string();
        }
        PLACEHOLDER_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                self.phrases
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Placeholder keys used in `text`, in order of appearance.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Purpose track -> flavor lookup. Every track has an entry and all
/// entries define the same phrase keys.
#[derive(Debug, Clone)]
pub struct PurposeTable {
    flavors: BTreeMap<PurposeTrack, PurposeFlavor>,
}

impl PurposeTable {
    pub fn new(flavors: BTreeMap<PurposeTrack, PurposeFlavor>) -> Result<Self, LibraryError> {
        for track in PurposeTrack::ALL {
            if !flavors.contains_key(&track) {
                return Err(LibraryError::MissingFlavor(track));
            }
        }

        let all_keys: BTreeSet<&String> = flavors.values().flat_map(|f| f.phrases.keys()).collect();
        for (track, flavor) in &flavors {
            if let Some(missing) = all_keys.iter().find(|k| !flavor.phrases.contains_key(**k)) {
                return Err(LibraryError::FlavorKeyMismatch {
                    purpose: *track,
                    key: (*missing).clone(),
                });
            }
        }

        Ok(PurposeTable { flavors })
    }

    /// Always succeeds: construction guarantees an entry per track.
    pub fn flavor(&self, track: PurposeTrack) -> &PurposeFlavor {
        &self.flavors[&track]
    }

    pub fn has_phrase(&self, key: &str) -> bool {
        self.flavors
            .values()
            .next()
            .is_some_and(|f| f.phrases.contains_key(key))
    }
}
