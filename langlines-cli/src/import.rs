use std::path::Path;

use crate::session::{open_panel, print_outcome, save_store};

/// Run the import command: scan the lang-file tree and upsert every line.
pub fn run_import_command(
    store_path: &Path,
    config_path: Option<&Path>,
    source: &Path,
    overwrite: bool,
    truncate: bool,
) -> Result<(), String> {
    if !source.is_dir() {
        return Err(format!("Source '{}' is not a directory", source.display()));
    }

    let mut panel = open_panel(store_path, config_path)?;
    let outcome = panel
        .import_lang_files(source, overwrite, truncate)
        .map_err(|e| e.to_string())?;
    print_outcome(&outcome);

    if let Some(report) = &outcome.report {
        println!("{}", report);
    }
    save_store(&panel.into_store(), store_path)
}
