//! End-to-end flows through the panel: lang-file import, sheet download,
//! sheet upload, and store persistence.

use std::fs;
use std::path::Path;

use langlines::{
    Capabilities, Error, LineFilter, LineStore, Panel, SheetFormat,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn lang_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "en/validation.json", r#"{"required": "This field is required"}"#);
    write(dir.path(), "fr/validation.json", r#"{"required": "Ce champ est requis"}"#);
    write(dir.path(), "en/auth.json", r#"{"failed": "These credentials do not match"}"#);
    write(dir.path(), "en.json", r#"{"Welcome back": "Welcome back"}"#);
    dir
}

#[test]
fn test_import_then_export_then_reupload() {
    let lang = lang_tree();
    let mut panel = Panel::new(LineStore::new(), Capabilities::all());

    let outcome = panel.import_lang_files(lang.path(), false, false).unwrap();
    assert_eq!(outcome.report.unwrap().created, 3);

    let sheet = panel.export_sheet().unwrap();
    assert_eq!(sheet.locales, vec!["en", "fr"]);
    assert_eq!(sheet.rows.len(), 3);

    let mut encoded = Vec::new();
    sheet.to_writer_with(&mut encoded, SheetFormat::Csv).unwrap();

    // Upload into a fresh panel with truncate; the store ends up identical.
    let mut other = Panel::new(LineStore::new(), Capabilities::all());
    let outcome = other
        .upload_sheet(encoded.as_slice(), SheetFormat::Csv, true)
        .unwrap();
    assert_eq!(outcome.report.unwrap().created, 3);
    assert_eq!(
        other.store().text_snapshot(),
        panel.store().text_snapshot()
    );
}

#[test]
fn test_second_lang_import_is_idempotent() {
    let lang = lang_tree();
    let mut panel = Panel::new(LineStore::new(), Capabilities::all());

    panel.import_lang_files(lang.path(), false, false).unwrap();
    let second = panel.import_lang_files(lang.path(), false, false).unwrap();

    let report = second.report.unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(report.unchanged, 3);
}

#[test]
fn test_truncating_import_drops_stale_lines() {
    let lang = lang_tree();
    let mut store = LineStore::new();
    store.upsert(
        "stale",
        "line",
        &[("en".to_string(), "left over".to_string())].into_iter().collect(),
        langlines::MergeMode::Fill,
    );

    let mut panel = Panel::new(store, Capabilities::all());
    panel.import_lang_files(lang.path(), true, true).unwrap();

    assert!(panel.store().get("stale", "line").is_none());
    assert_eq!(panel.store().len(), 3);
}

#[test]
fn test_fill_import_keeps_manual_edits() {
    let lang = lang_tree();
    let mut panel = Panel::new(LineStore::new(), Capabilities::all());
    panel.import_lang_files(lang.path(), false, false).unwrap();

    // Operator fixes a translation by hand.
    let form = langlines::EditForm {
        text: Some(
            [
                ("en".to_string(), "Manually fixed".to_string()),
                ("fr".to_string(), "Ce champ est requis".to_string()),
            ]
            .into_iter()
            .collect(),
        ),
        ..langlines::EditForm::default()
    };
    panel.edit_line("validation", "required", &form).unwrap();

    // A fill-mode re-import must not undo the fix.
    panel.import_lang_files(lang.path(), false, false).unwrap();
    let line = panel.store().get("validation", "required").unwrap();
    assert_eq!(line.text.get("en").unwrap(), "Manually fixed");

    // An overwrite re-import restores the source files' values.
    panel.import_lang_files(lang.path(), true, false).unwrap();
    let line = panel.store().get("validation", "required").unwrap();
    assert_eq!(line.text.get("en").unwrap(), "This field is required");
}

#[test]
fn test_unreadable_sheet_surfaces_failure() {
    let mut panel = Panel::new(LineStore::new(), Capabilities::all());
    let err = panel
        .upload_sheet("no,header,here\n".as_bytes(), SheetFormat::Csv, false)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidHeader(_)));
    assert!(panel.store().is_empty());
}

#[test]
fn test_store_persists_across_sessions() {
    let lang = lang_tree();
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("lines.json");

    let mut panel = Panel::new(LineStore::new(), Capabilities::all());
    panel.import_lang_files(lang.path(), false, false).unwrap();
    panel.into_store().save_to_file(&store_path).unwrap();

    let reloaded = LineStore::load_from_file(&store_path).unwrap();
    let panel = Panel::new(reloaded, Capabilities::default());
    let rows = panel.list(&LineFilter {
        missing_locale: Some("fr".to_string()),
        ..LineFilter::default()
    });

    // Only (validation, required) has a French value.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.present.get("fr") == Some(&false)));
}
