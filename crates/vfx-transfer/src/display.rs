//! Display curves: sRGB (IEC 61966-2-1) and Rec.709 (BT.709 OETF).
//!
//! Both are a power law above a breakpoint and a straight toe below it.
//! Negative input follows the toe, so both directions are odd-symmetric
//! around zero in the toe region and never produce NaN.

/// Power law with a linear toe:
/// `scale * x^gamma - (scale - 1)` above `lin_break`, `toe_slope * x` below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPower {
    /// Exponent of the encode power segment.
    pub gamma: f64,
    /// Multiplier on the power segment.
    pub scale: f64,
    /// Slope of the toe.
    pub toe_slope: f64,
    /// Last linear value on the toe (sRGB) / first on the power segment (Rec.709).
    pub lin_break: f64,
    /// Coded value where decode switches to the power segment.
    pub code_break: f64,
    /// `true` when the breakpoint itself belongs to the toe.
    pub break_on_toe: bool,
}

/// sRGB: toe 12.92 up to 0.0031308, `1.055 x^(1/2.4) - 0.055` above.
pub const SRGB: DisplayPower = DisplayPower {
    gamma: 1.0 / 2.4,
    scale: 1.055,
    toe_slope: 12.92,
    lin_break: 0.0031308,
    code_break: 0.04045,
    break_on_toe: true,
};

/// Rec.709: toe 4.5 below 0.018, `1.099 x^0.45 - 0.099` from there on.
pub const REC709: DisplayPower = DisplayPower {
    gamma: 0.45,
    scale: 1.099,
    toe_slope: 4.5,
    lin_break: 0.018,
    code_break: 0.081,
    break_on_toe: false,
};

impl DisplayPower {
    #[inline]
    fn on_toe(&self, v: f64, brk: f64) -> bool {
        if self.break_on_toe { v <= brk } else { v < brk }
    }

    /// Linear to coded.
    #[inline]
    pub fn encode(&self, x: f64) -> f64 {
        if self.on_toe(x, self.lin_break) {
            x * self.toe_slope
        } else {
            self.scale * x.powf(self.gamma) - (self.scale - 1.0)
        }
    }

    /// Coded to linear.
    #[inline]
    pub fn decode(&self, v: f64) -> f64 {
        if self.on_toe(v, self.code_break) {
            v / self.toe_slope
        } else {
            ((v + (self.scale - 1.0)) / self.scale).powf(1.0 / self.gamma)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn srgb_reference_points() {
        assert_abs_diff_eq!(SRGB.encode(0.18), 0.461_356, epsilon = 1e-6);
        assert_abs_diff_eq!(SRGB.decode(0.5), 0.214_041, epsilon = 1e-6);
        assert_eq!(SRGB.encode(1.0), 1.0);
    }

    #[test]
    fn rec709_reference_points() {
        assert_abs_diff_eq!(REC709.encode(0.18), 0.409_008, epsilon = 1e-6);
        assert_eq!(REC709.encode(0.01), 0.045);
        assert_abs_diff_eq!(REC709.encode(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn negatives_follow_toe() {
        assert_eq!(SRGB.encode(-0.5), -6.46);
        assert_eq!(REC709.decode(-0.09), -0.02);
    }

    #[test]
    fn toe_and_power_meet() {
        for curve in [SRGB, REC709] {
            let toe = curve.lin_break * curve.toe_slope;
            let pow = curve.scale * curve.lin_break.powf(curve.gamma) - (curve.scale - 1.0);
            assert!((toe - pow).abs() < 5e-4, "{:?}", curve);
        }
    }
}
