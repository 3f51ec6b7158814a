use std::{fs::File, io::BufReader, path::Path};

use langlines::infer_format_from_extension;

use crate::session::{open_panel, print_outcome, save_store};

/// Run the upload command: import a sheet file into the store.
pub fn run_upload_command(
    store_path: &Path,
    config_path: Option<&Path>,
    input: &Path,
    truncate: bool,
) -> Result<(), String> {
    let format = infer_format_from_extension(input)
        .ok_or_else(|| format!("Cannot infer sheet format from path: {}", input.display()))?;
    let file = File::open(input)
        .map_err(|e| format!("Failed to open '{}': {}", input.display(), e))?;

    let mut panel = open_panel(store_path, config_path)?;
    let outcome = panel
        .upload_sheet(BufReader::new(file), format, truncate)
        .map_err(|e| e.to_string())?;
    print_outcome(&outcome);

    if let Some(report) = &outcome.report {
        println!("{}", report);
    }
    save_store(&panel.into_store(), store_path)
}
