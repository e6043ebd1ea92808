//! Error types for sheetgen

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Sheetgen errors
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration source could be located. Recoverable: the caller
    /// writes the sample workbook and halts so the operator can edit it.
    #[error("configuration not found: {0}")]
    ConfigMissing(String),

    /// A sheet is structurally unusable or a row lacks a required field.
    /// Fatal to the generation run.
    #[error("sheet {sheet}: {detail}")]
    ConfigMalformed { sheet: String, detail: String },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a malformed-sheet error
    pub fn malformed(sheet: &str, detail: impl Into<String>) -> Self {
        Error::ConfigMalformed {
            sheet: sheet.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
