//! Tabular sheet formats for language-line export and import.
//!
//! This module provides the [`SheetFormat`] enum for generic format
//! handling and re-exports the [`Sheet`] model.

pub mod sheet;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use sheet::{Sheet, SheetRow};

use crate::Error;

/// Supported tabular formats for the export/import sheet.
///
/// The sheet layout is the same in every format: `group`, `key`, then one
/// column per locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl Display for SheetFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetFormat::Csv => write!(f, "csv"),
            SheetFormat::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for SheetFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "csv" => Ok(SheetFormat::Csv),
            "tsv" => Ok(SheetFormat::Tsv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl SheetFormat {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "csv",
            SheetFormat::Tsv => "tsv",
        }
    }

    /// Returns the MIME type used when serving a downloaded sheet.
    pub fn mime_type(&self) -> &'static str {
        match self {
            SheetFormat::Csv => "text/csv",
            SheetFormat::Tsv => "text/tab-separated-values",
        }
    }

    /// The field delimiter byte for the csv reader/writer.
    pub(crate) fn delimiter(&self) -> u8 {
        match self {
            SheetFormat::Csv => b',',
            SheetFormat::Tsv => b'\t',
        }
    }
}

/// Infers a [`SheetFormat`] from a file path's extension.
///
/// # Example
/// ```rust
/// use langlines::formats::{SheetFormat, infer_format_from_extension};
/// assert_eq!(infer_format_from_extension("lines.csv"), Some(SheetFormat::Csv));
/// assert_eq!(infer_format_from_extension("lines.tsv"), Some(SheetFormat::Tsv));
/// assert_eq!(infer_format_from_extension("lines.xlsx"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<std::path::Path>>(path: P) -> Option<SheetFormat> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some("csv") => Some(SheetFormat::Csv),
        Some("tsv") => Some(SheetFormat::Tsv),
        _ => None,
    }
}
