//! Panel configuration: a TOML file mapping onto capability flags.
//!
//! Every flag defaults to off, so a deployment's config file enables
//! exactly what its operators may do:
//!
//! ```toml
//! [resource]
//! allow_delete = true
//!
//! [resource.form]
//! edit_values = true
//! add_locales = true
//!
//! ["lang-import"]
//! allow_overwrite = true
//! allow_truncate = true
//!
//! [sheets]
//! allow_all = true
//! allow_export = true
//! allow_import = true
//! ```

use std::path::Path;

use langlines::Capabilities;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub resource: ResourceSection,
    #[serde(default, rename = "lang-import")]
    pub lang_import: LangImportSection,
    #[serde(default)]
    pub sheets: SheetsSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ResourceSection {
    #[serde(default)]
    pub allow_delete: bool,
    #[serde(default)]
    pub form: FormSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FormSection {
    #[serde(default)]
    pub edit_group: bool,
    #[serde(default)]
    pub edit_key: bool,
    #[serde(default)]
    pub edit_values: bool,
    #[serde(default)]
    pub add_locales: bool,
    #[serde(default)]
    pub delete_locales: bool,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LangImportSection {
    #[serde(default)]
    pub allow_overwrite: bool,
    #[serde(default)]
    pub allow_truncate: bool,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SheetsSection {
    #[serde(default)]
    pub allow_export: bool,
    #[serde(default)]
    pub allow_import: bool,
    #[serde(default)]
    pub allow_all: bool,
}

impl PanelConfig {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            edit_group: self.resource.form.edit_group,
            edit_key: self.resource.form.edit_key,
            edit_text_values: self.resource.form.edit_values,
            add_text_locales: self.resource.form.add_locales,
            delete_text_locales: self.resource.form.delete_locales,
            allow_delete: self.resource.allow_delete,
            allow_overwrite: self.lang_import.allow_overwrite,
            allow_truncate: self.lang_import.allow_truncate,
            allow_export: self.sheets.allow_export,
            allow_import: self.sheets.allow_import,
            allow_sheets: self.sheets.allow_all,
        }
    }
}

/// Reads capabilities from a config file. `None` means no config was
/// given, which leaves every capability off.
pub fn load_capabilities(path: Option<&Path>) -> Result<Capabilities, String> {
    let Some(path) = path else {
        return Ok(Capabilities::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
    let config: PanelConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?;
    Ok(config.capabilities())
}
