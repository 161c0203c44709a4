//! # vfx-lut
//!
//! Look-Up Tables and color matrices for the color core.
//!
//! # Types
//!
//! - [`Lut1D`] - per-channel curves, linear interpolation
//! - [`Lut3D`] - full RGB cube, nearest / trilinear / tetrahedral
//! - [`Matrix`] - 3x3 matrix with offset
//!
//! Construction validates shape: a grid or table with fewer than 2 entries,
//! or data whose length does not match the declared size, is an
//! [`LutError::InvalidSize`]. After construction every type is read-only and
//! `Send + Sync`.
//!
//! # Files
//!
//! - `.cube` (1D and 3D) - [`cube`] module
//! - `.spimtx` - [`matrix`] module
//!
//! # Usage
//!
//! ```rust
//! use vfx_lut::{Interpolation, Lut1D, Lut3D};
//!
//! let shaper = Lut1D::new(vec![0.0, 0.5, 1.0]).unwrap();
//! assert_eq!(shaper.apply(0.25), 0.25);
//!
//! let grade = Lut3D::identity(33)
//!     .unwrap()
//!     .with_interpolation(Interpolation::Tetrahedral);
//! let rgb = grade.apply([0.5, 0.3, 0.2]);
//! assert!((rgb[0] - 0.5).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod interp;
mod lut1d;
mod lut3d;
pub mod cube;
pub mod matrix;

pub use cube::{
    read_1d as read_cube_1d, read_3d as read_cube_3d, write_1d as write_cube_1d,
    write_3d as write_cube_3d,
};
pub use error::{LutError, LutResult};
pub use interp::Interpolation;
pub use lut1d::Lut1D;
pub use lut3d::Lut3D;
pub use matrix::{read_spimtx, write_spimtx, Matrix};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn value_types_are_shareable() {
        assert_send_sync::<Lut1D>();
        assert_send_sync::<Lut3D>();
        assert_send_sync::<Matrix>();
    }
}
