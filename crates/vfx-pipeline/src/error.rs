//! Error types for building and running pipelines.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from pipeline construction, loading and buffer dispatch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O error reading a pipeline description.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Pipeline description not found.
    #[error("pipeline file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An op that cannot be built from its description.
    #[error("invalid op: {0}")]
    InvalidOp(String),

    /// LUT or matrix file error.
    #[error(transparent)]
    Lut(#[from] vfx_lut::LutError),

    /// CDL file error.
    #[error(transparent)]
    Cdl(#[from] vfx_cdl::CdlError),

    /// Buffer shape error.
    #[error(transparent)]
    Core(#[from] vfx_core::Error),

    /// The caller raised the cancel flag before every row was processed.
    #[error("pipeline apply cancelled")]
    Cancelled,
}
