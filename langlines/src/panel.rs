//! The language-line panel: the resource screen with presentation
//! stripped out.
//!
//! Every operator-facing affordance is gated by an explicit capability
//! flag, and every action returns notification values instead of talking
//! to a UI, so the screen logic is testable on its own. A disabled action
//! always fails with [`Error::ActionDisabled`]; it is never a silent
//! success.

use std::{collections::BTreeMap, io::BufRead, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    formats::{Sheet, SheetFormat},
    langfiles::ImportFromLangFiles,
    operations::{ImportOptions, ImportReport, export_sheet, import_sheet},
    store::LineStore,
    types::TextMap,
};

/// Capability flags, one per configuration option of the panel.
///
/// Everything defaults to off; deployments enable exactly the affordances
/// their operators may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The edit form lets operators change a line's group.
    pub edit_group: bool,
    /// The edit form lets operators change a line's key.
    pub edit_key: bool,
    /// The edit form lets operators change existing translations.
    pub edit_text_values: bool,
    /// The edit form lets operators add translations for new locales.
    pub add_text_locales: bool,
    /// The edit form lets operators remove a locale's translation.
    pub delete_text_locales: bool,
    /// Bulk delete is available.
    pub allow_delete: bool,
    /// The lang-file import may be run with `overwrite`.
    pub allow_overwrite: bool,
    /// Imports may be run with `truncate`.
    pub allow_truncate: bool,
    /// Sheet download is available.
    pub allow_export: bool,
    /// Sheet upload is available.
    pub allow_import: bool,
    /// Master switch for the sheet action group.
    pub allow_sheets: bool,
}

impl Capabilities {
    /// Every capability enabled. Convenient for tests and trusted setups.
    pub fn all() -> Self {
        Capabilities {
            edit_group: true,
            edit_key: true,
            edit_text_values: true,
            add_text_locales: true,
            delete_text_locales: true,
            allow_delete: true,
            allow_overwrite: true,
            allow_truncate: true,
            allow_export: true,
            allow_import: true,
            allow_sheets: true,
        }
    }
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Danger,
}

/// A user-visible message produced by a panel action. The UI layer (here,
/// the CLI) decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(id: &str, title: impl Into<String>) -> Self {
        Notification {
            id: id.to_string(),
            title: title.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn success(id: &str, title: impl Into<String>) -> Self {
        Notification {
            id: id.to_string(),
            title: title.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn danger(id: &str, title: impl Into<String>) -> Self {
        Notification {
            id: id.to_string(),
            title: title.into(),
            kind: NotificationKind::Danger,
        }
    }
}

/// What a panel action produced: the messages to show, and counters when
/// the action was an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    pub notifications: Vec<Notification>,
    pub report: Option<ImportReport>,
}

/// Filters for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFilter {
    /// Only lines in this group.
    pub group: Option<String>,
    /// Only lines with no translation for this locale.
    pub missing_locale: Option<String>,
    /// Case-insensitive substring match over key and translations.
    pub search: Option<String>,
}

/// One row of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    pub id: u64,
    pub group: String,
    pub key: String,
    /// Per-locale presence: true when the line has a non-empty translation.
    pub present: BTreeMap<String, bool>,
    /// First words of each translation, for the table's text column.
    pub preview: String,
    pub updated_at: DateTime<Utc>,
}

/// The edit form. `None` fields are left untouched; `text` replaces the
/// whole mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub group: Option<String>,
    pub key: Option<String>,
    pub text: Option<TextMap>,
}

/// The panel itself: a store plus the capabilities of the current
/// deployment.
#[derive(Debug)]
pub struct Panel {
    store: LineStore,
    capabilities: Capabilities,
}

impl Panel {
    pub fn new(store: LineStore, capabilities: Capabilities) -> Self {
        Panel {
            store,
            capabilities,
        }
    }

    pub fn store(&self) -> &LineStore {
        &self.store
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Hands the store back, e.g. to persist it after actions ran.
    pub fn into_store(self) -> LineStore {
        self.store
    }

    /// Runs the lang-file import job against the store.
    ///
    /// The `overwrite` and `truncate` toggles are only honored when the
    /// matching capability is enabled; requesting a disabled toggle fails
    /// instead of silently dropping it.
    pub fn import_lang_files(
        &mut self,
        source: &Path,
        overwrite: bool,
        truncate: bool,
    ) -> Result<ActionOutcome, Error> {
        if overwrite && !self.capabilities.allow_overwrite {
            return Err(Error::ActionDisabled("lang-file import with overwrite"));
        }
        if truncate && !self.capabilities.allow_truncate {
            return Err(Error::ActionDisabled("lang-file import with truncate"));
        }

        let mut notifications = vec![Notification::info(
            "processing_lang",
            "Processing language files",
        )];
        let job = ImportFromLangFiles::new(source, overwrite, truncate);
        let report = job.run(&mut self.store)?;
        notifications.push(Notification::success(
            "finished_lang",
            format!("Done processing language files ({})", report),
        ));

        Ok(ActionOutcome {
            notifications,
            report: Some(report),
        })
    }

    /// Serializes the store into a downloadable sheet.
    pub fn export_sheet(&self) -> Result<Sheet, Error> {
        if !(self.capabilities.allow_sheets && self.capabilities.allow_export) {
            return Err(Error::ActionDisabled("sheet export"));
        }
        Ok(export_sheet(&self.store))
    }

    /// Parses an uploaded sheet and imports it.
    ///
    /// The upload form only carries a `truncate` toggle; merging uses
    /// overwrite semantics, matching the screen it is modeled on.
    pub fn upload_sheet<R: BufRead>(
        &mut self,
        reader: R,
        format: SheetFormat,
        truncate: bool,
    ) -> Result<ActionOutcome, Error> {
        if !(self.capabilities.allow_sheets && self.capabilities.allow_import) {
            return Err(Error::ActionDisabled("sheet import"));
        }
        if truncate && !self.capabilities.allow_truncate {
            return Err(Error::ActionDisabled("sheet import with truncate"));
        }

        let mut notifications = vec![Notification::info(
            "processing_import",
            "Processing import file",
        )];
        let sheet = Sheet::from_reader_with(reader, format)?;
        let report = import_sheet(
            &mut self.store,
            &sheet,
            &ImportOptions {
                truncate,
                overwrite: true,
            },
        );
        notifications.push(Notification::success(
            "finished_import",
            format!("Done processing import file ({})", report),
        ));

        Ok(ActionOutcome {
            notifications,
            report: Some(report),
        })
    }

    /// Bulk delete by `(group, key)` selection.
    pub fn delete_lines(&mut self, selection: &[(String, String)]) -> Result<ActionOutcome, Error> {
        if !self.capabilities.allow_delete {
            return Err(Error::ActionDisabled("bulk delete"));
        }

        let mut deleted = 0;
        for (group, key) in selection {
            if self.store.remove(group, key) {
                deleted += 1;
            }
        }

        Ok(ActionOutcome {
            notifications: vec![Notification::success(
                "deleted_lines",
                format!("Deleted {} language lines", deleted),
            )],
            report: None,
        })
    }

    /// Applies the edit form to one line, respecting the field-level
    /// capabilities.
    pub fn edit_line(&mut self, group: &str, key: &str, form: &EditForm) -> Result<ActionOutcome, Error> {
        let Some(line) = self.store.get(group, key) else {
            return Err(Error::LineNotFound {
                group: group.to_string(),
                key: key.to_string(),
            });
        };

        let new_group = form.group.as_deref().unwrap_or(group);
        let new_key = form.key.as_deref().unwrap_or(key);
        if new_group != group && !self.capabilities.edit_group {
            return Err(Error::ActionDisabled("editing a line's group"));
        }
        if new_key != key && !self.capabilities.edit_key {
            return Err(Error::ActionDisabled("editing a line's key"));
        }

        if let Some(text) = &form.text {
            for (locale, value) in text {
                match line.text.get(locale) {
                    Some(current) if current != value && !self.capabilities.edit_text_values => {
                        return Err(Error::ActionDisabled("editing translations"));
                    }
                    None if !self.capabilities.add_text_locales => {
                        return Err(Error::ActionDisabled("adding locales to a line"));
                    }
                    _ => {}
                }
            }
            if line.text.keys().any(|locale| !text.contains_key(locale))
                && !self.capabilities.delete_text_locales
            {
                return Err(Error::ActionDisabled("removing locales from a line"));
            }
        }

        self.store.rekey(group, key, new_group, new_key)?;
        if let Some(text) = &form.text {
            self.store.replace_text(new_group, new_key, text.clone());
        }

        Ok(ActionOutcome {
            notifications: vec![Notification::success(
                "saved_line",
                format!("Saved ({}, {})", new_group, new_key),
            )],
            report: None,
        })
    }

    /// The list view: filtered rows with per-locale presence indicators.
    pub fn list(&self, filter: &LineFilter) -> Vec<LineRow> {
        let locales = self.store.locales();
        let search = filter.search.as_deref().map(str::to_lowercase);

        self.store
            .iter()
            .filter(|line| {
                if let Some(group) = &filter.group
                    && line.group != *group
                {
                    return false;
                }
                if let Some(locale) = &filter.missing_locale
                    && line.is_translated(locale)
                {
                    return false;
                }
                if let Some(needle) = &search {
                    let in_key = line.key.to_lowercase().contains(needle);
                    let in_text = line
                        .text
                        .values()
                        .any(|v| v.to_lowercase().contains(needle));
                    if !in_key && !in_text {
                        return false;
                    }
                }
                true
            })
            .map(|line| LineRow {
                id: line.id,
                group: line.group.clone(),
                key: line.key.clone(),
                present: locales
                    .iter()
                    .map(|locale| (locale.clone(), line.is_translated(locale)))
                    .collect(),
                preview: preview_text(&line.text),
                updated_at: line.updated_at,
            })
            .collect()
    }
}

/// The table's text column: the first three words of each non-empty
/// translation, truncated with `...`, joined by commas.
pub fn preview_text(text: &TextMap) -> String {
    text.values()
        .filter(|value| !value.is_empty())
        .map(|value| {
            let words: Vec<&str> = value.split_whitespace().collect();
            if words.len() > 3 {
                format!("{}...", words[..3].join(" "))
            } else {
                words.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MergeMode;

    fn text(pairs: &[(&str, &str)]) -> TextMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn seeded_panel(capabilities: Capabilities) -> Panel {
        let mut store = LineStore::new();
        store.upsert(
            "validation",
            "required",
            &text(&[("en", "This field is absolutely required"), ("fr", "Ce champ est requis")]),
            MergeMode::Fill,
        );
        store.upsert("auth", "failed", &text(&[("en", "Login failed")]), MergeMode::Fill);
        Panel::new(store, capabilities)
    }

    #[test]
    fn test_disabled_export_is_an_error() {
        let panel = seeded_panel(Capabilities::default());
        let err = panel.export_sheet().unwrap_err();
        assert!(matches!(err, Error::ActionDisabled("sheet export")));
    }

    #[test]
    fn test_export_needs_both_sheet_flags() {
        let panel = seeded_panel(Capabilities {
            allow_export: true,
            ..Capabilities::default()
        });
        assert!(panel.export_sheet().is_err());

        let panel = seeded_panel(Capabilities {
            allow_sheets: true,
            allow_export: true,
            ..Capabilities::default()
        });
        let sheet = panel.export_sheet().unwrap();
        assert_eq!(sheet.rows.len(), 2);
    }

    #[test]
    fn test_upload_truncate_gated_separately() {
        let mut panel = seeded_panel(Capabilities {
            allow_sheets: true,
            allow_import: true,
            ..Capabilities::default()
        });

        let csv = "group,key,en\nauth,failed,Changed\n";
        let err = panel
            .upload_sheet(csv.as_bytes(), SheetFormat::Csv, true)
            .unwrap_err();
        assert!(matches!(err, Error::ActionDisabled(_)));

        let outcome = panel
            .upload_sheet(csv.as_bytes(), SheetFormat::Csv, false)
            .unwrap();
        assert_eq!(outcome.report.unwrap().updated, 1);
        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(outcome.notifications[0].kind, NotificationKind::Info);
        assert_eq!(outcome.notifications[1].kind, NotificationKind::Success);
    }

    #[test]
    fn test_import_lang_files_flag_gating() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        std::fs::write(dir.path().join("en/auth.json"), r#"{"failed": "Failed"}"#).unwrap();

        let mut panel = seeded_panel(Capabilities::default());
        let err = panel.import_lang_files(dir.path(), true, false).unwrap_err();
        assert!(matches!(err, Error::ActionDisabled(_)));

        // Both toggles off: the plain import is always available.
        let outcome = panel.import_lang_files(dir.path(), false, false).unwrap();
        let report = outcome.report.unwrap();
        assert_eq!(report.unchanged + report.updated + report.created, 1);
    }

    #[test]
    fn test_delete_lines_gated_and_counted() {
        let mut panel = seeded_panel(Capabilities::default());
        let selection = vec![("auth".to_string(), "failed".to_string())];
        assert!(panel.delete_lines(&selection).is_err());

        let mut panel = seeded_panel(Capabilities::all());
        let selection = vec![
            ("auth".to_string(), "failed".to_string()),
            ("auth".to_string(), "missing".to_string()),
        ];
        let outcome = panel.delete_lines(&selection).unwrap();
        assert!(outcome.notifications[0].title.contains("Deleted 1"));
        assert_eq!(panel.store().len(), 1);
    }

    #[test]
    fn test_edit_line_field_gating() {
        let mut panel = seeded_panel(Capabilities::default());

        // Immutable group/key by default.
        let form = EditForm {
            group: Some("session".to_string()),
            ..EditForm::default()
        };
        let err = panel.edit_line("auth", "failed", &form).unwrap_err();
        assert!(matches!(err, Error::ActionDisabled("editing a line's group")));

        // Changing an existing value needs edit_text_values.
        let form = EditForm {
            text: Some(text(&[("en", "Different")])),
            ..EditForm::default()
        };
        assert!(panel.edit_line("auth", "failed", &form).is_err());

        // Dropping a locale needs delete_text_locales.
        let mut panel = seeded_panel(Capabilities {
            edit_text_values: true,
            ..Capabilities::default()
        });
        let form = EditForm {
            text: Some(text(&[("en", "Changed")])),
            ..EditForm::default()
        };
        let err = panel.edit_line("validation", "required", &form).unwrap_err();
        assert!(matches!(err, Error::ActionDisabled("removing locales from a line")));
    }

    #[test]
    fn test_edit_line_applies_form() {
        let mut panel = seeded_panel(Capabilities::all());
        let form = EditForm {
            group: Some("session".to_string()),
            key: Some("expired".to_string()),
            text: Some(text(&[("en", "Session expired"), ("nl", "Sessie verlopen")])),
        };
        panel.edit_line("auth", "failed", &form).unwrap();

        assert!(panel.store().get("auth", "failed").is_none());
        let line = panel.store().get("session", "expired").unwrap();
        assert_eq!(line.text, text(&[("en", "Session expired"), ("nl", "Sessie verlopen")]));
    }

    #[test]
    fn test_edit_line_blanked_value_keeps_round_trip_exact() {
        let mut panel = seeded_panel(Capabilities::all());

        // Clearing a translation by blanking the cell stores no entry.
        let form = EditForm {
            text: Some(text(&[("en", ""), ("fr", "Ce champ est requis")])),
            ..EditForm::default()
        };
        panel.edit_line("validation", "required", &form).unwrap();
        let line = panel.store().get("validation", "required").unwrap();
        assert!(!line.text.contains_key("en"));

        // Export then overwrite re-import reproduces the store exactly.
        let sheet = panel.export_sheet().unwrap();
        let mut reimported = panel.store().clone();
        let report = import_sheet(
            &mut reimported,
            &sheet,
            &ImportOptions {
                truncate: false,
                overwrite: true,
            },
        );
        assert!(!report.changed_store());
        assert_eq!(reimported.text_snapshot(), panel.store().text_snapshot());
    }

    #[test]
    fn test_edit_line_missing_line() {
        let mut panel = seeded_panel(Capabilities::all());
        let err = panel.edit_line("nope", "nope", &EditForm::default()).unwrap_err();
        assert!(matches!(err, Error::LineNotFound { .. }));
    }

    #[test]
    fn test_list_presence_and_filters() {
        let panel = seeded_panel(Capabilities::default());

        let rows = panel.list(&LineFilter::default());
        assert_eq!(rows.len(), 2);
        let auth_row = rows.iter().find(|r| r.group == "auth").unwrap();
        assert_eq!(auth_row.present.get("en"), Some(&true));
        assert_eq!(auth_row.present.get("fr"), Some(&false));

        let rows = panel.list(&LineFilter {
            group: Some("validation".to_string()),
            ..LineFilter::default()
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "required");

        let rows = panel.list(&LineFilter {
            missing_locale: Some("fr".to_string()),
            ..LineFilter::default()
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group, "auth");

        let rows = panel.list(&LineFilter {
            search: Some("CHAMP".to_string()),
            ..LineFilter::default()
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group, "validation");
    }

    #[test]
    fn test_preview_truncates_to_three_words() {
        let preview = preview_text(&text(&[
            ("en", "This field is absolutely required"),
            ("fr", "Requis"),
            ("nl", ""),
        ]));
        assert_eq!(preview, "This field is..., Requis");
    }
}
