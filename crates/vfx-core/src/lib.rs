//! # vfx-core
//!
//! Shared building blocks for the color core crates.
//!
//! Everything in the workspace works on plain `f32` RGB triples. This crate
//! holds the few things more than one crate needs to agree on:
//!
//! - [`Rgb`] - the pixel triple every transform consumes and produces
//! - [`REC709_LUMA_R`], [`REC709_LUMA_G`], [`REC709_LUMA_B`] - luma weights
//!   used by CDL saturation
//! - [`ImageDims`] - validated width/height/channel shape of an interleaved
//!   buffer, with alpha passthrough rules
//! - [`Error`] - shape validation errors
//!
//! ## Crate Structure
//!
//! ```text
//! vfx-core (this crate)
//!    ^
//!    |
//!    +-- vfx-cdl (grading)
//!    +-- vfx-pipeline (buffer dispatch)
//! ```
//!
//! `vfx-fastmath`, `vfx-lut` and `vfx-transfer` have no internal
//! dependencies.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dims;
pub mod error;
pub mod pixel;

pub use dims::ImageDims;
pub use error::{Error, Result};
pub use pixel::{
    luma_rec709, Rgb, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R,
};
