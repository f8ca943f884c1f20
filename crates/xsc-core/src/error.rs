//! Error types for xsc-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xsc-core
#[derive(Debug, Error)]
pub enum Error {
    /// Input file does not exist
    #[error("file not found: '{0}'")]
    NotFound(PathBuf),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not well-formed XML
    #[error("invalid XML structure in '{path}': {source}")]
    XmlParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A required element is present but carries no text
    #[error("element <{element}> has no text in '{path}'")]
    MissingText { path: PathBuf, element: String },

    /// A data row lacks a cell for a column named in the header
    #[error("row {row} in '{path}' has no value for column '{column}'")]
    MissingCell {
        path: PathBuf,
        row: usize,
        column: String,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify an I/O failure on `path`, separating a missing file from other read errors
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path)
        } else {
            Error::FileRead { path, source }
        }
    }
}
