#![forbid(unsafe_code)]
//! Language-line management toolkit for Rust.
//!
//! A language line is one localized text string, addressed by a `(group, key)`
//! pair and carrying a locale → translation mapping. This crate provides the
//! store for those lines, tabular (CSV/TSV) export and import, a lang-file
//! import job that scans per-locale JSON trees, and the capability-gated
//! panel that composes them into an operator-facing screen.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langlines::{Capabilities, LineStore, Panel};
//!
//! let store = LineStore::load_from_file("lines.json")?;
//! let mut panel = Panel::new(store, Capabilities::all());
//!
//! let outcome = panel.import_lang_files("lang".as_ref(), false, false)?;
//! for notification in &outcome.notifications {
//!     println!("{}", notification.title);
//! }
//! panel.into_store().save_to_file("lines.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Merge semantics
//!
//! Imports run in one of two modes: `Overwrite` replaces a line's whole text
//! mapping with the incoming one, `Fill` only adds translations for locales
//! that are currently untranslated. Empty incoming cells never produce a
//! locale entry, so exporting and re-importing with `Overwrite` is an exact
//! round trip.

pub mod error;
pub mod formats;
pub mod langfiles;
pub mod operations;
pub mod panel;
pub mod store;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{Sheet, SheetFormat, infer_format_from_extension},
    langfiles::{ImportFromLangFiles, scan_lang_files},
    operations::{ImportOptions, ImportReport, export_sheet, import_sheet},
    panel::{ActionOutcome, Capabilities, EditForm, LineFilter, LineRow, Notification, NotificationKind, Panel},
    store::LineStore,
    types::{LanguageLine, MergeMode, TextMap, UpsertOutcome},
};
