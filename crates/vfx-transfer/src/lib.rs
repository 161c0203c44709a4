//! # vfx-transfer
//!
//! Transfer curves: linear light to coded values and back.
//!
//! Every curve is a variant of [`Curve`]. Evaluation happens in f64 and the
//! result is narrowed to f32 once, so the f32 entry points are deterministic
//! across platforms that share a libm.
//!
//! # Curves
//!
//! | Curve | Family | Linear side | Below zero |
//! |-------|--------|-------------|------------|
//! | sRGB, Rec.709 | [`display`] | [0, 1] | follows the toe |
//! | PQ | [`pq`] | cd/m2, [0, 10000] | 0 |
//! | HLG | [`hlg`] | [0, 1] | 0 |
//! | LogC3, LogC4, S-Log2, S-Log3, V-Log, Log3G10, BMD Film Gen5, DaVinci Intermediate, ACEScct | [`log_affine`] | scene-referred | follows the toe |
//! | Canon Log 2, Canon Log 3 | [`canon_log`] | scene-referred | mirrored log arm |
//! | Apple Log | [`apple_log`] | scene-referred | 0 below R0 |
//! | ACEScc | [`acescc`] | scene-referred | 2^-16 floor |
//!
//! PQ clamps luminance above 10000 nits to a signal of 1.0. No other curve
//! clamps above its nominal range.
//!
//! # Usage
//!
//! ```rust
//! use vfx_transfer::{curve_decode, curve_encode, Curve};
//!
//! let code = curve_encode(Curve::ArriLogC3, 0.18);
//! assert!((code - 0.391).abs() < 1e-3);
//! assert!((curve_decode(Curve::ArriLogC3, code) - 0.18).abs() < 1e-6);
//!
//! let curve: Curve = "slog3".parse().unwrap();
//! assert_eq!(curve, Curve::SonySLog3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod acescc;
pub mod apple_log;
pub mod canon_log;
mod curve;
pub mod display;
mod error;
pub mod hlg;
pub mod log_affine;
pub mod pq;

pub use curve::{curve_decode, curve_encode, Curve, CurveSpec, Direction};
pub use error::UnknownCurve;
