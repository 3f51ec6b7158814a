//! Shared plumbing for the commands: store loading and saving, panel
//! construction, and notification printing.

use std::path::Path;

use langlines::{ActionOutcome, LineStore, NotificationKind, Panel};

use crate::config::load_capabilities;

/// Loads the store file if it exists, otherwise starts empty.
pub fn open_store(path: &Path) -> Result<LineStore, String> {
    if path.exists() {
        LineStore::load_from_file(path)
            .map_err(|e| format!("Failed to read store '{}': {}", path.display(), e))
    } else {
        Ok(LineStore::new())
    }
}

pub fn save_store(store: &LineStore, path: &Path) -> Result<(), String> {
    store
        .save_to_file(path)
        .map_err(|e| format!("Failed to write store '{}': {}", path.display(), e))
}

/// Builds a panel from the store file and the optional config file.
pub fn open_panel(store_path: &Path, config_path: Option<&Path>) -> Result<Panel, String> {
    let capabilities = load_capabilities(config_path)?;
    Ok(Panel::new(open_store(store_path)?, capabilities))
}

/// Prints each notification the way the screen would toast it.
pub fn print_outcome(outcome: &ActionOutcome) {
    for notification in &outcome.notifications {
        let tag = match notification.kind {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Danger => "danger",
        };
        println!("[{}] {}", tag, notification.title);
    }
}

/// Parses a `group/key` selector; a spec without `/` addresses an
/// ungrouped ("single") line.
pub fn parse_line_spec(spec: &str) -> (String, String) {
    match spec.split_once('/') {
        Some((group, key)) => (group.to_string(), key.to_string()),
        None => (String::new(), spec.to_string()),
    }
}
