//! Core types for langlines.
//! The store, sheet codecs, and import operations all work on these.

use std::{collections::BTreeMap, fmt::Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A map from locale code (e.g. "en", "fr") to translated text.
/// An absent locale means the line is untranslated for that locale.
pub type TextMap = BTreeMap<String, String>;

/// One localized text string, addressed by `(group, key)`.
///
/// `group` is a namespace such as `"validation"`; the empty string is used
/// for ungrouped ("single") lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageLine {
    /// Unique identifier, assigned by the store on creation. Immutable.
    pub id: u64,

    /// Namespace for the key. Empty for single lines.
    pub group: String,

    /// Identifier, unique within its group.
    pub key: String,

    /// Locale code → translated text.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub text: TextMap,

    /// Set on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl LanguageLine {
    /// Whether this line carries a non-empty translation for `locale`.
    pub fn is_translated(&self, locale: &str) -> bool {
        self.text.get(locale).is_some_and(|v| !v.is_empty())
    }

    /// All locales this line carries a non-empty translation for.
    pub fn translated_locales(&self) -> impl Iterator<Item = &str> {
        self.text
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.as_str())
    }
}

impl Display for LanguageLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LanguageLine {{ id: {}, group: {}, key: {}, locales: [{}] }}",
            self.id,
            self.group,
            self.key,
            self.text.keys().cloned().collect::<Vec<_>>().join(", ")
        )
    }
}

/// Policy applied when an incoming text mapping meets an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// The incoming mapping replaces the existing one entirely;
    /// locales absent from the incoming mapping are cleared.
    Overwrite,
    /// Incoming values only fill locales that are currently untranslated
    /// (absent or empty). Existing non-empty values are never touched.
    Fill,
}

impl MergeMode {
    /// Maps the panel's `overwrite` toggle onto a merge mode.
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            MergeMode::Overwrite
        } else {
            MergeMode::Fill
        }
    }
}

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Strips empty cells from an incoming mapping. An empty incoming value
/// means "untranslated" and never produces a locale entry, so an exported
/// sheet (which writes empty cells for absent locales) imports back to an
/// identical text mapping.
pub(crate) fn normalize_text(incoming: &TextMap) -> TextMap {
    incoming
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Applies `incoming` to `existing` under `mode`. Returns true if
/// `existing` changed.
pub(crate) fn merge_text(existing: &mut TextMap, incoming: &TextMap, mode: MergeMode) -> bool {
    match mode {
        MergeMode::Overwrite => {
            let incoming = normalize_text(incoming);
            if *existing == incoming {
                false
            } else {
                *existing = incoming;
                true
            }
        }
        MergeMode::Fill => {
            let mut changed = false;
            for (locale, value) in incoming {
                if value.is_empty() {
                    continue;
                }
                let current = existing.get(locale);
                if current.is_none_or(|v| v.is_empty()) {
                    existing.insert(locale.clone(), value.clone());
                    changed = true;
                }
            }
            changed
        }
    }
}
