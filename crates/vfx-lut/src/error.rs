//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors raised while building or loading LUTs.
#[derive(Debug, Error)]
pub enum LutError {
    /// Grid size below 2 or a table length that does not match the size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Domain with `max <= min`.
    #[error("invalid input range: [{min}, {max}]")]
    InvalidRange {
        /// Minimum value
        min: f32,
        /// Maximum value
        max: f32,
    },

    /// Malformed LUT or matrix file.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
