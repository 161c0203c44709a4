//! # vfx-cdl
//!
//! ASC Color Decision List grading: slope, offset, power and saturation.
//!
//! The forward operator clamps to [0, 1] after slope/offset and again after
//! saturation, and evaluates the power stage with
//! [`vfx_fastmath::pow_approx`] so results round the same way as OCIO's
//! CDL op rather than as IEEE `powf`.
//!
//! # Usage
//!
//! ```rust
//! use vfx_cdl::{apply_cdl, CdlParams};
//!
//! let contrast = CdlParams::new()
//!     .with_offset([-0.1; 3])
//!     .with_power([1.2; 3]);
//!
//! // Clamp happens before the power stage.
//! let out = apply_cdl(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], &contrast);
//! assert_eq!(out[0], [0.0, 0.0, 0.0]);
//! ```
//!
//! # Styles and direction
//!
//! - [`CdlStyle::Asc`] - clamped ASC v1.2 operator (default)
//! - [`CdlStyle::NoClamp`] - no clamping, negatives bypass the power stage
//! - [`CdlDirection::Reverse`] - inverse of either style
//!
//! # Files
//!
//! `.cc` and `.ccc` documents are handled by the [`xml`] module.
//!
//! # Dependencies
//!
//! - `vfx-core` - pixel type and Rec.709 luma weights
//! - `vfx-fastmath` - polynomial pow
//! - `quick-xml` - CDL XML

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod params;
pub mod xml;

pub use error::{CdlError, CdlResult};
pub use params::{CdlDirection, CdlParams, CdlStyle, SAT_EPSILON};
pub use xml::{
    parse_cc, parse_ccc, read_cc, read_ccc, write_cc, write_ccc, ColorCorrection,
    ColorCorrectionCollection,
};

use vfx_core::Rgb;

/// Applies the clamped forward CDL to every pixel and returns a new buffer of
/// the same length.
pub fn apply_cdl(buffer: &[Rgb], params: &CdlParams) -> Vec<Rgb> {
    buffer.iter().map(|&rgb| params.apply(rgb)).collect()
}
