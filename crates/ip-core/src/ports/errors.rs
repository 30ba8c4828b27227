use thiserror::Error;

use crate::placeholder::Position;

/// Failures reported by the host's text-buffer API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("editor buffer unavailable: {0}")]
    Unavailable(String),

    #[error("position out of range: line {line}, column {column}")]
    OutOfRange { line: usize, column: usize },

    #[error("edit rejected by editor: {0}")]
    Rejected(String),
}

/// Failures of the fetch-and-store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("unexpected HTTP status {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("write failed: {0}")]
    Io(String),

    #[error("invalid image source: {0}")]
    InvalidSource(String),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

impl EditorError {
    pub fn out_of_range(position: Position) -> Self {
        EditorError::OutOfRange {
            line: position.line,
            column: position.column,
        }
    }
}
