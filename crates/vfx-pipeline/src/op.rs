//! Single transform steps.

use std::fmt;

use vfx_cdl::{CdlDirection, CdlParams, CdlStyle};
use vfx_core::Rgb;
use vfx_lut::{Lut1D, Lut3D, Matrix};
use vfx_transfer::CurveSpec;

/// One step of a [`Pipeline`](crate::Pipeline).
///
/// Every op maps an RGB triple to an RGB triple and holds only read-only
/// data, so a built pipeline can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    /// ASC CDL grade.
    Cdl {
        /// Slope, offset, power, saturation.
        params: CdlParams,
        /// Clamping behavior.
        style: CdlStyle,
        /// Forward or reverse.
        direction: CdlDirection,
    },
    /// Per-channel 1D LUT.
    Lut1D(Lut1D),
    /// 3D LUT, using the interpolation stored on the LUT.
    Lut3D(Lut3D),
    /// Transfer curve in one direction.
    Curve(CurveSpec),
    /// 3x3 matrix plus offset.
    Matrix(Matrix),
    /// Clamp every channel to `[min, max]`. NaN passes through.
    Clamp {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

impl TransformOp {
    /// Forward ASC CDL.
    pub fn cdl(params: CdlParams) -> Self {
        Self::Cdl {
            params,
            style: CdlStyle::Asc,
            direction: CdlDirection::Forward,
        }
    }

    /// Short lowercase name of the op kind, as used in pipeline files.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cdl { .. } => "cdl",
            Self::Lut1D(_) => "lut1d",
            Self::Lut3D(_) => "lut3d",
            Self::Curve(_) => "curve",
            Self::Matrix(_) => "matrix",
            Self::Clamp { .. } => "clamp",
        }
    }

    /// Applies this op to one pixel.
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        match self {
            Self::Cdl {
                params,
                style,
                direction,
            } => params.apply_with(rgb, *style, *direction),
            Self::Lut1D(lut) => lut.apply_rgb(rgb),
            Self::Lut3D(lut) => lut.apply(rgb),
            Self::Curve(spec) => spec.apply_rgb(rgb),
            Self::Matrix(m) => m.apply(rgb),
            Self::Clamp { min, max } => rgb.map(|v| {
                if v < *min {
                    *min
                } else if v > *max {
                    *max
                } else {
                    v
                }
            }),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cdl { style, .. } => write!(f, "cdl ({})", style),
            Self::Lut1D(lut) => write!(f, "lut1d ({} entries)", lut.size()),
            Self::Lut3D(lut) => write!(
                f,
                "lut3d ({}^3, {})",
                lut.size(),
                lut.interpolation().name()
            ),
            Self::Curve(spec) => write!(f, "curve ({} {})", spec.curve, spec.direction.name()),
            Self::Matrix(_) => f.write_str("matrix"),
            Self::Clamp { min, max } => write!(f, "clamp [{}, {}]", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vfx_transfer::Curve;

    #[test]
    fn clamp_keeps_nan() {
        let op = TransformOp::Clamp { min: 0.0, max: 1.0 };
        let out = op.apply([-0.5, 2.0, f32::NAN]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 1.0);
        assert!(out[2].is_nan());
    }

    #[test]
    fn cdl_helper_is_forward_asc() {
        let params = CdlParams::new().with_offset([-0.1; 3]).with_power([1.2; 3]);
        let op = TransformOp::cdl(params);
        assert_eq!(op.apply([0.0; 3]), [0.0; 3]);
        assert_eq!(op.apply([0.5, 0.4, 0.3]), params.apply([0.5, 0.4, 0.3]));
    }

    #[test]
    fn names() {
        let op = TransformOp::Curve(CurveSpec::decode(Curve::ArriLogC3));
        assert_eq!(op.kind(), "curve");
        assert_eq!(op.to_string(), "curve (arri_logc3 decode)");
        assert_eq!(TransformOp::Matrix(Matrix::identity()).kind(), "matrix");
    }
}
