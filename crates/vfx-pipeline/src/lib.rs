//! # vfx-pipeline
//!
//! Chains CDL grades, LUTs, transfer curves, matrices and clamps into one
//! [`Pipeline`] and runs it over interleaved pixel buffers.
//!
//! A built pipeline is immutable and `Send + Sync`. Buffer application
//! splits the image into rows and processes them on rayon's global pool.
//! The fourth channel of an RGBA buffer is passed through untouched.
//!
//! # Usage
//!
//! ```rust
//! use vfx_cdl::CdlParams;
//! use vfx_pipeline::Pipeline;
//! use vfx_transfer::{Curve, CurveSpec};
//!
//! let look = Pipeline::new()
//!     .curve(CurveSpec::decode(Curve::ArriLogC3))
//!     .cdl(CdlParams::new().with_slope([1.1, 1.0, 0.9]))
//!     .curve(CurveSpec::encode(Curve::Srgb));
//!
//! let out = look.apply_rgb([0.391, 0.391, 0.391]);
//! assert!(out[0] > out[2]);
//! ```
//!
//! Pipelines can also be described in YAML, see [`config`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
mod error;
mod op;
mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use op::TransformOp;
pub use pipeline::Pipeline;
