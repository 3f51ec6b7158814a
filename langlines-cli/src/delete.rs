use std::path::Path;

use crate::session::{open_panel, parse_line_spec, print_outcome, save_store};

/// Run the delete command: bulk delete by `group/key` selectors.
pub fn run_delete_command(
    store_path: &Path,
    config_path: Option<&Path>,
    specs: &[String],
) -> Result<(), String> {
    if specs.is_empty() {
        return Err("At least one group/key selector is required".to_string());
    }

    let selection: Vec<(String, String)> = specs.iter().map(|s| parse_line_spec(s)).collect();
    let mut panel = open_panel(store_path, config_path)?;
    let outcome = panel.delete_lines(&selection).map_err(|e| e.to_string())?;
    print_outcome(&outcome);
    save_store(&panel.into_store(), store_path)
}
