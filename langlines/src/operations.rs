//! High-level store operations: sheet export and sheet import.
//!
//! These are the two batch operations exposed by the panel; the lang-file
//! import job in [`crate::langfiles`] reuses the same upsert semantics.

use serde::{Deserialize, Serialize};

use crate::{
    formats::Sheet,
    store::LineStore,
    types::{MergeMode, UpsertOutcome},
};

/// Flags controlling an import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Delete all existing lines before processing any row. Irreversible.
    pub truncate: bool,
    /// Replace conflicting values instead of only filling gaps.
    pub overwrite: bool,
}

impl ImportOptions {
    pub fn merge_mode(&self) -> MergeMode {
        MergeMode::from_overwrite(self.overwrite)
    }
}

/// Row counters for one import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Rows skipped because their `key` cell was empty.
    pub skipped_empty_key: usize,
    /// Rows that did not fit the header (missing required columns).
    pub failed: usize,
}

impl ImportReport {
    /// Total rows considered, including skipped and failed ones.
    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged + self.skipped_empty_key + self.failed
    }

    /// Whether the batch changed the store at all.
    pub fn changed_store(&self) -> bool {
        self.created > 0 || self.updated > 0
    }

    pub(crate) fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "created: {}, updated: {}, unchanged: {}, skipped (empty key): {}, failed: {}",
            self.created, self.updated, self.unchanged, self.skipped_empty_key, self.failed
        )
    }
}

/// Serializes the whole store into a sheet.
///
/// One row per line in store iteration order (group, then key); locale
/// columns are the sorted union of all locales in the store, so the output
/// is deterministic for a given store state.
pub fn export_sheet(store: &LineStore) -> Sheet {
    let locales = store.locales();
    let mut sheet = Sheet::new(locales);

    for line in store.iter() {
        let values: Vec<String> = sheet
            .locales
            .iter()
            .map(|locale| line.text.get(locale).cloned().unwrap_or_default())
            .collect();
        sheet.push_row(&line.group, &line.key, values);
    }

    log::debug!("exported {} lines across {} locales", sheet.rows.len(), sheet.locales.len());
    sheet
}

/// Applies a parsed sheet to the store.
///
/// Rows are processed top to bottom, so a later row for the same
/// `(group, key)` is applied on top of an earlier one under the same merge
/// mode. Rows with an empty `key` never create or update a line.
pub fn import_sheet(store: &mut LineStore, sheet: &Sheet, options: &ImportOptions) -> ImportReport {
    if options.truncate {
        log::warn!("truncating store before import ({} lines)", store.len());
        store.truncate();
    }

    let mode = options.merge_mode();
    let mut report = ImportReport {
        failed: sheet.malformed_rows,
        ..ImportReport::default()
    };

    for row in &sheet.rows {
        if row.key.is_empty() {
            report.skipped_empty_key += 1;
            continue;
        }
        let text = row.text_map(&sheet.locales);
        report.record(store.upsert(&row.group, &row.key, &text, mode));
    }

    log::info!("sheet import finished: {}", report);
    report
}
