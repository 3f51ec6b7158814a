//! The language-line store.
//!
//! `LineStore` keeps all `LanguageLine` records keyed by `(group, key)`,
//! which both enforces the uniqueness invariant and gives deterministic
//! group-then-key iteration order for export. The store persists itself
//! to a JSON file; in a full deployment the same interface would sit in
//! front of a database table.

use std::{collections::BTreeMap, path::Path};

use chrono::Utc;

use crate::{
    error::Error,
    types::{LanguageLine, MergeMode, TextMap, UpsertOutcome, merge_text, normalize_text},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStore {
    lines: BTreeMap<(String, String), LanguageLine>,
    next_id: u64,
}

impl Default for LineStore {
    fn default() -> Self {
        LineStore::new()
    }
}

impl LineStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        LineStore {
            lines: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates all lines in group-then-key order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageLine> {
        self.lines.values()
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&LanguageLine> {
        self.lines.get(&(group.to_string(), key.to_string()))
    }

    pub fn get_by_id(&self, id: u64) -> Option<&LanguageLine> {
        self.lines.values().find(|line| line.id == id)
    }

    /// Sorted union of all locale codes carried by any line.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self
            .lines
            .values()
            .flat_map(|line| line.text.keys().cloned())
            .collect();
        locales.sort();
        locales.dedup();
        locales
    }

    /// Inserts or updates the line at `(group, key)` with `text` under the
    /// given merge mode. Creation assigns a fresh id; any mutation bumps
    /// `updated_at`.
    pub fn upsert(
        &mut self,
        group: &str,
        key: &str,
        text: &TextMap,
        mode: MergeMode,
    ) -> UpsertOutcome {
        let map_key = (group.to_string(), key.to_string());
        match self.lines.get_mut(&map_key) {
            Some(line) => {
                if merge_text(&mut line.text, text, mode) {
                    line.updated_at = Utc::now();
                    UpsertOutcome::Updated
                } else {
                    UpsertOutcome::Unchanged
                }
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.lines.insert(
                    map_key,
                    LanguageLine {
                        id,
                        group: group.to_string(),
                        key: key.to_string(),
                        text: normalize_text(text),
                        updated_at: Utc::now(),
                    },
                );
                UpsertOutcome::Created
            }
        }
    }

    /// Replaces the full text mapping of an existing line. Empty values are
    /// dropped, same as on import. Returns false if no line exists at
    /// `(group, key)`.
    pub fn replace_text(&mut self, group: &str, key: &str, text: TextMap) -> bool {
        let text = normalize_text(&text);
        match self.lines.get_mut(&(group.to_string(), key.to_string())) {
            Some(line) => {
                if line.text != text {
                    line.text = text;
                    line.updated_at = Utc::now();
                }
                true
            }
            None => false,
        }
    }

    /// Moves a line to a new `(group, key)` address, keeping its id and text.
    ///
    /// Fails with [`Error::DuplicateLine`] if the target address is already
    /// taken, preserving the uniqueness invariant.
    pub fn rekey(
        &mut self,
        group: &str,
        key: &str,
        new_group: &str,
        new_key: &str,
    ) -> Result<bool, Error> {
        if group == new_group && key == new_key {
            return Ok(self.get(group, key).is_some());
        }
        let target = (new_group.to_string(), new_key.to_string());
        if self.lines.contains_key(&target) {
            return Err(Error::DuplicateLine {
                group: new_group.to_string(),
                key: new_key.to_string(),
            });
        }
        let Some(mut line) = self.lines.remove(&(group.to_string(), key.to_string())) else {
            return Ok(false);
        };
        line.group = new_group.to_string();
        line.key = new_key.to_string();
        line.updated_at = Utc::now();
        self.lines.insert(target, line);
        Ok(true)
    }

    /// Removes the line at `(group, key)`. Returns whether a line existed.
    pub fn remove(&mut self, group: &str, key: &str) -> bool {
        self.lines
            .remove(&(group.to_string(), key.to_string()))
            .is_some()
    }

    /// Deletes every line. Irreversible.
    pub fn truncate(&mut self) {
        self.lines.clear();
    }

    /// The `(group, key) → text` view of the store, used by tests and the
    /// round-trip property.
    pub fn text_snapshot(&self) -> BTreeMap<(String, String), TextMap> {
        self.lines
            .iter()
            .map(|(k, line)| (k.clone(), line.text.clone()))
            .collect()
    }

    /// Persists all lines to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = std::fs::File::create(path)?;
        let lines: Vec<&LanguageLine> = self.lines.values().collect();
        serde_json::to_writer(&mut writer, &lines)?;
        Ok(())
    }

    /// Loads a store from a JSON file written by [`LineStore::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = std::fs::File::open(path)?;
        let lines: Vec<LanguageLine> = serde_json::from_reader(reader)?;

        let mut store = LineStore::new();
        for line in lines {
            store.next_id = store.next_id.max(line.id + 1);
            let map_key = (line.group.clone(), line.key.clone());
            if store.lines.insert(map_key, line).is_some() {
                return Err(Error::InvalidStore(
                    "duplicate (group, key) pair in store file".to_string(),
                ));
            }
        }
        Ok(store)
    }
}
