//! Error types for vfx-core.
//!
//! # Usage
//!
//! ```rust
//! use vfx_core::{Error, ImageDims};
//!
//! let err = ImageDims::new(0, 4, 3).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions(_)));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Image dimensions are zero, overflow, or use an unsupported channel count.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffer length does not match the declared shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vfx_core::Error;
    ///
    /// let err = Error::BufferSizeMismatch { expected: 12, actual: 9 };
    /// assert!(err.to_string().contains("12"));
    /// ```
    #[error("buffer size mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch {
        /// Values implied by width * height * channels
        expected: usize,
        /// Values actually present
        actual: usize,
    },
}
