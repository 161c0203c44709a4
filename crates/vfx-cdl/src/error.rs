//! CDL error types.

use thiserror::Error;

/// Result type for CDL operations.
pub type CdlResult<T> = Result<T, CdlError>;

/// Errors that can occur while reading or writing CDL files.
#[derive(Debug, Error)]
pub enum CdlError {
    /// Malformed value inside an otherwise well-formed document.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The XML itself could not be read.
    #[error("XML error: {0}")]
    Xml(String),

    /// Unknown style name.
    #[error("unknown CDL style: {0}")]
    UnknownStyle(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
