//! All error types for the langlines crate.
//!
//! These are returned from all fallible operations (store access, sheet
//! parsing, lang-file scanning, panel actions).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown sheet format `{0}`")]
    UnknownFormat(String),

    #[error("invalid sheet header: {0}")]
    InvalidHeader(String),

    #[error("invalid lang file {path}: {message}")]
    InvalidLangFile { path: PathBuf, message: String },

    #[error("invalid store file: {0}")]
    InvalidStore(String),

    #[error("duplicate language line ({group}, {key})")]
    DuplicateLine { group: String, key: String },

    #[error("no language line at ({group}, {key})")]
    LineNotFound { group: String, key: String },

    #[error("action `{0}` is disabled by configuration")]
    ActionDisabled(&'static str),
}

impl Error {
    /// Creates a new invalid-header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Error::InvalidHeader(message.into())
    }

    /// Creates a new invalid-lang-file error for the given path.
    pub fn invalid_lang_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::InvalidLangFile {
            path: path.into(),
            message: message.into(),
        }
    }
}
