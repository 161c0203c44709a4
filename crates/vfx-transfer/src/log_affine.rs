//! Log-affine camera curves.
//!
//! Most camera logs share one shape:
//!
//! ```text
//! x >= lin_break:  y = log_slope * log_base(lin_slope * x + lin_offset) + log_offset
//! x <  lin_break:  y = toe_slope * x + toe_offset
//! ```
//!
//! Curves published with an explicit toe (LogC3, S-Log2, S-Log3, V-Log,
//! DaVinci Intermediate, ACEScct) use it as given. The rest (LogC4,
//! Log3G10, BMD Film Gen5) take the tangent of the log segment at the break,
//! which makes the curve C1 there.
//!
//! Decode switches at the log-side value of the break, so a value encoded
//! on the log segment always decodes through the log segment.

/// Logarithm base of the log segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBase {
    /// log2 / exp2
    Two,
    /// log10 / 10^x
    Ten,
    /// ln / exp
    E,
}

impl LogBase {
    #[inline]
    fn log(self, v: f64) -> f64 {
        match self {
            Self::Two => v.log2(),
            Self::Ten => v.log10(),
            Self::E => v.ln(),
        }
    }

    #[inline]
    fn pow(self, v: f64) -> f64 {
        match self {
            Self::Two => v.exp2(),
            Self::Ten => 10.0_f64.powf(v),
            Self::E => v.exp(),
        }
    }

    fn ln(self) -> f64 {
        match self {
            Self::Two => std::f64::consts::LN_2,
            Self::Ten => std::f64::consts::LN_10,
            Self::E => 1.0,
        }
    }
}

/// Linear segment below the break.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toe {
    /// Tangent to the log segment at the break.
    Derived,
    /// Published slope and offset.
    Explicit {
        /// Slope of the linear segment.
        slope: f64,
        /// Value of the linear segment at 0.
        offset: f64,
    },
}

/// Constants of one log-affine curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogAffine {
    /// Base of the logarithm.
    pub base: LogBase,
    /// Multiplier on the logarithm.
    pub log_slope: f64,
    /// Added after the logarithm.
    pub log_offset: f64,
    /// Multiplier on linear input inside the logarithm.
    pub lin_slope: f64,
    /// Added to scaled linear input inside the logarithm.
    pub lin_offset: f64,
    /// Linear value where the log segment starts.
    pub lin_break: f64,
    /// Segment used below `lin_break`.
    pub toe: Toe,
}

impl LogAffine {
    #[inline]
    fn log_segment(&self, x: f64) -> f64 {
        self.log_slope * self.base.log(self.lin_slope * x + self.lin_offset) + self.log_offset
    }

    /// Coded value at the break, as produced by the log segment.
    #[inline]
    pub fn log_break(&self) -> f64 {
        self.log_segment(self.lin_break)
    }

    /// Slope and offset of the toe.
    #[inline]
    pub fn toe(&self) -> (f64, f64) {
        match self.toe {
            Toe::Explicit { slope, offset } => (slope, offset),
            Toe::Derived => {
                let inner = self.lin_slope * self.lin_break + self.lin_offset;
                let slope = self.log_slope * self.lin_slope / (inner * self.base.ln());
                (slope, self.log_break() - slope * self.lin_break)
            }
        }
    }

    /// Linear to coded.
    #[inline]
    pub fn encode(&self, x: f64) -> f64 {
        if x >= self.lin_break {
            self.log_segment(x)
        } else {
            let (slope, offset) = self.toe();
            slope * x + offset
        }
    }

    /// Coded to linear.
    #[inline]
    pub fn decode(&self, y: f64) -> f64 {
        if y >= self.log_break() {
            (self.base.pow((y - self.log_offset) / self.log_slope) - self.lin_offset)
                / self.lin_slope
        } else {
            let (slope, offset) = self.toe();
            (y - offset) / slope
        }
    }
}

/// ARRI LogC3, EI 800.
pub const ARRI_LOGC3: LogAffine = LogAffine {
    base: LogBase::Ten,
    log_slope: 0.247190,
    log_offset: 0.385537,
    lin_slope: 5.555556,
    lin_offset: 0.052272,
    lin_break: 0.010591,
    toe: Toe::Explicit {
        slope: 5.367655,
        offset: 0.092809,
    },
};

/// ARRI LogC4.
pub const ARRI_LOGC4: LogAffine = LogAffine {
    base: LogBase::Two,
    log_slope: 0.0647954196341293,
    log_offset: -0.295908392682586,
    lin_slope: 2231.82630906769,
    lin_offset: 64.0,
    lin_break: -0.0180569961199113,
    toe: Toe::Derived,
};

/// Sony S-Log2, full range output (`/ 1.03` folded into the constants).
pub const SONY_SLOG2: LogAffine = LogAffine {
    base: LogBase::Ten,
    log_slope: 0.432699 / 1.03,
    log_offset: (0.616596 + 0.03) / 1.03,
    lin_slope: 1.0,
    lin_offset: 0.037584,
    lin_break: 0.0,
    toe: Toe::Explicit {
        slope: 5.0 / 1.03,
        offset: 0.030001222 / 1.03,
    },
};

/// Sony S-Log3: `(420 + 261.5 log10((x + 0.01) / 0.19)) / 1023`.
pub const SONY_SLOG3: LogAffine = LogAffine {
    base: LogBase::Ten,
    log_slope: 261.5 / 1023.0,
    log_offset: 420.0 / 1023.0,
    lin_slope: 1.0 / 0.19,
    lin_offset: 0.01 / 0.19,
    lin_break: 0.01125,
    toe: Toe::Explicit {
        slope: (171.2102946929 - 95.0) / (0.01125 * 1023.0),
        offset: 95.0 / 1023.0,
    },
};

/// Panasonic V-Log.
pub const PANASONIC_VLOG: LogAffine = LogAffine {
    base: LogBase::Ten,
    log_slope: 0.241514,
    log_offset: 0.598206,
    lin_slope: 1.0,
    lin_offset: 0.00873,
    lin_break: 0.01,
    toe: Toe::Explicit {
        slope: 5.6,
        offset: 0.125,
    },
};

/// RED Log3G10.
pub const RED_LOG3G10: LogAffine = LogAffine {
    base: LogBase::Ten,
    log_slope: 0.224282,
    log_offset: 0.0,
    lin_slope: 155.975327,
    lin_offset: 0.01 * 155.975327 + 1.0,
    lin_break: -0.01,
    toe: Toe::Derived,
};

/// Blackmagic Film Generation 5.
pub const BMD_FILM_GEN5: LogAffine = LogAffine {
    base: LogBase::E,
    log_slope: 0.0869287606549122,
    log_offset: 0.530013339229194,
    lin_slope: 1.0,
    lin_offset: 0.00549407243225781,
    lin_break: 0.005,
    toe: Toe::Derived,
};

/// DaVinci Intermediate: `c (log2(x + a) + b)` above the cut, `m x` below.
pub const DAVINCI_INTERMEDIATE: LogAffine = LogAffine {
    base: LogBase::Two,
    log_slope: 0.07329248,
    log_offset: 7.0 * 0.07329248,
    lin_slope: 1.0,
    lin_offset: 0.0075,
    lin_break: 0.00262409,
    toe: Toe::Explicit {
        slope: 10.44426855,
        offset: 0.0,
    },
};

/// ACEScct (S-2016-001).
pub const ACESCCT: LogAffine = LogAffine {
    base: LogBase::Two,
    log_slope: 1.0 / 17.52,
    log_offset: 9.72 / 17.52,
    lin_slope: 1.0,
    lin_offset: 0.0,
    lin_break: 0.0078125,
    toe: Toe::Explicit {
        slope: 10.5402377416545,
        offset: 0.0729055341958355,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [LogAffine; 9] = [
        ARRI_LOGC3,
        ARRI_LOGC4,
        SONY_SLOG2,
        SONY_SLOG3,
        PANASONIC_VLOG,
        RED_LOG3G10,
        BMD_FILM_GEN5,
        DAVINCI_INTERMEDIATE,
        ACESCCT,
    ];

    #[test]
    fn toe_meets_log_segment() {
        for curve in ALL {
            let (slope, offset) = curve.toe();
            let toe_at_break = slope * curve.lin_break + offset;
            assert!(
                (toe_at_break - curve.log_break()).abs() < 1e-5,
                "{:?}: {} vs {}",
                curve,
                toe_at_break,
                curve.log_break()
            );
        }
    }

    #[test]
    fn derived_toe_is_tangent() {
        for curve in [ARRI_LOGC4, RED_LOG3G10, BMD_FILM_GEN5] {
            let (slope, _) = curve.toe();
            let h = 1e-7;
            let numeric = (curve.encode(curve.lin_break + h) - curve.log_break()) / h;
            assert!((numeric - slope).abs() / slope < 1e-4, "{:?}", curve);
        }
    }

    #[test]
    fn published_gray_points() {
        assert_abs_diff_eq!(ARRI_LOGC3.encode(0.18), 0.391_007, epsilon = 1e-5);
        assert_abs_diff_eq!(ARRI_LOGC4.encode(0.18), 0.278_396, epsilon = 1e-5);
        assert_abs_diff_eq!(SONY_SLOG3.encode(0.18), 420.0 / 1023.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ACESCCT.encode(0.18), 0.413_588, epsilon = 1e-5);
        assert_abs_diff_eq!(RED_LOG3G10.encode(0.0), 0.091_551, epsilon = 1e-5);
    }

    #[test]
    fn decode_inverts_both_segments() {
        for curve in ALL {
            for x in [curve.lin_break - 0.004, curve.lin_break + 0.5, 4.0] {
                assert_abs_diff_eq!(curve.decode(curve.encode(x)), x, epsilon = 1e-9);
            }
        }
    }
}
