//! Scanning source translation files and importing them into the store.
//!
//! The source tree is laid out per locale, JSON key-value files:
//!
//! ```text
//! <root>/en.json              flat "single" lines, group ""
//! <root>/en/validation.json   lines for group "validation"
//! <root>/fr/auth.json         nesting allowed, keys are flattened
//! ```
//!
//! Nested objects flatten to dot-separated keys, so
//! `{"password": {"min": "Too short"}}` in `validation.json` becomes the
//! line `(validation, password.min)`.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    operations::{ImportOptions, ImportReport},
    store::LineStore,
    types::TextMap,
};

/// One `(group, key)` discovered in the source tree, with the union of its
/// per-locale values across all files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLine {
    pub group: String,
    pub key: String,
    pub text: TextMap,
}

/// Walks the source tree and returns the discovered lines in group-then-key
/// order.
///
/// Locales are processed in sorted order, the flat `<locale>.json` file
/// before the locale's group directory, groups sorted within it; when the
/// same `(group, key, locale)` is contributed twice, the last-processed
/// value wins.
///
/// Files that are not `.json`, and names that are not valid locale codes,
/// are skipped with a warning. Unreadable or unparseable `.json` files are
/// fatal for the whole scan.
pub fn scan_lang_files(root: &Path) -> Result<Vec<DiscoveredLine>, Error> {
    let mut flat_files: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut locale_dirs: BTreeMap<String, PathBuf> = BTreeMap::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::warn!("skipping non-UTF-8 name in {}", root.display());
            continue;
        };

        if path.is_dir() {
            match name.parse::<LanguageIdentifier>() {
                Ok(_) => {
                    locale_dirs.insert(name.to_string(), path);
                }
                Err(_) => log::warn!("skipping directory `{}`: not a locale code", name),
            }
        } else if let Some(stem) = locale_file_stem(&path) {
            flat_files.insert(stem, path);
        }
    }

    let mut discovered: BTreeMap<(String, String), TextMap> = BTreeMap::new();
    let mut locales: Vec<String> = flat_files.keys().chain(locale_dirs.keys()).cloned().collect();
    locales.sort();
    locales.dedup();

    for locale in &locales {
        if let Some(path) = flat_files.get(locale) {
            collect_file(path, locale, "", &mut discovered)?;
        }
        if let Some(dir) = locale_dirs.get(locale) {
            let mut group_files: Vec<PathBuf> = Vec::new();
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.is_dir() {
                    log::warn!("skipping nested directory {}", path.display());
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    group_files.push(path);
                } else {
                    log::warn!("skipping non-JSON file {}", path.display());
                }
            }
            group_files.sort();
            for path in group_files {
                let group = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                collect_file(&path, locale, &group, &mut discovered)?;
            }
        }
    }

    Ok(discovered
        .into_iter()
        .map(|((group, key), text)| DiscoveredLine { group, key, text })
        .collect())
}

/// Lang-file import as a dispatchable job.
///
/// The job is a plain serializable value so a queue runner can own it;
/// [`ImportFromLangFiles::run`] executes it synchronously. Running it twice
/// against unchanged sources with `overwrite = false` reports no created or
/// updated lines on the second run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFromLangFiles {
    pub source: PathBuf,
    pub options: ImportOptions,
}

impl ImportFromLangFiles {
    pub fn new(source: impl Into<PathBuf>, overwrite: bool, truncate: bool) -> Self {
        ImportFromLangFiles {
            source: source.into(),
            options: ImportOptions { truncate, overwrite },
        }
    }

    /// Scans the source tree and upserts every discovered line.
    ///
    /// The tree is scanned before anything is deleted, so a truncating run
    /// against an unreadable tree leaves the store untouched.
    pub fn run(&self, store: &mut LineStore) -> Result<ImportReport, Error> {
        let lines = scan_lang_files(&self.source)?;

        if self.options.truncate {
            log::warn!("truncating store before lang-file import ({} lines)", store.len());
            store.truncate();
        }

        let mode = self.options.merge_mode();
        let mut report = ImportReport::default();
        for line in &lines {
            report.record(store.upsert(&line.group, &line.key, &line.text, mode));
        }

        log::info!("lang-file import finished: {}", report);
        Ok(report)
    }
}

// The stem of `<locale>.json`, if the file looks like a flat locale file.
fn locale_file_stem(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        log::warn!("skipping non-JSON file {}", path.display());
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    match stem.parse::<LanguageIdentifier>() {
        Ok(_) => Some(stem.to_string()),
        Err(_) => {
            log::warn!("skipping file `{}`: stem is not a locale code", path.display());
            None
        }
    }
}

fn collect_file(
    path: &Path,
    locale: &str,
    group: &str,
    discovered: &mut BTreeMap<(String, String), TextMap>,
) -> Result<(), Error> {
    let reader = std::fs::File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(reader)
        .map_err(|e| Error::invalid_lang_file(path, e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(Error::invalid_lang_file(path, "top level must be an object"));
    };

    let mut flattened = Vec::new();
    flatten_object(&map, String::new(), path, &mut flattened)?;
    for (key, value) in flattened {
        discovered
            .entry((group.to_string(), key))
            .or_default()
            .insert(locale.to_string(), value);
    }
    Ok(())
}

// Flattens nested objects to dot-separated keys; only string leaves are
// valid translations.
fn flatten_object(
    map: &serde_json::Map<String, serde_json::Value>,
    prefix: String,
    path: &Path,
    out: &mut Vec<(String, String)>,
) -> Result<(), Error> {
    for (key, value) in map {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            serde_json::Value::String(s) => out.push((dotted, s.clone())),
            serde_json::Value::Object(nested) => flatten_object(nested, dotted, path, out)?,
            other => {
                return Err(Error::invalid_lang_file(
                    path,
                    format!("expected string value at `{}`, found {}", dotted, other),
                ));
            }
        }
    }
    Ok(())
}
