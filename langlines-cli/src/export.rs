use std::path::Path;

use langlines::infer_format_from_extension;

use crate::session::open_panel;

/// Run the export command: write the whole store as a sheet.
pub fn run_export_command(
    store_path: &Path,
    config_path: Option<&Path>,
    output: &Path,
) -> Result<(), String> {
    let format = infer_format_from_extension(output)
        .ok_or_else(|| format!("Cannot infer sheet format from path: {}", output.display()))?;

    let panel = open_panel(store_path, config_path)?;
    let sheet = panel.export_sheet().map_err(|e| e.to_string())?;
    sheet
        .write_file(output, format)
        .map_err(|e| format!("Error writing {}: {}", output.display(), e))?;

    println!(
        "✅ Exported {} lines across {} locales to {}",
        sheet.rows.len(),
        sheet.locales.len(),
        output.display()
    );
    Ok(())
}
