//! The [`Curve`] tag and its dispatch to the curve families.

use std::fmt;
use std::str::FromStr;

use crate::log_affine::{self, LogAffine};
use crate::canon_log::{self, CanonLog};
use crate::display::{self, DisplayPower};
use crate::{acescc, apple_log, hlg, pq, UnknownCurve};

/// Every transfer curve the library knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// sRGB (IEC 61966-2-1).
    Srgb,
    /// Rec.709 OETF.
    Rec709,
    /// SMPTE ST 2084, linear side in nits.
    Pq,
    /// BT.2100 Hybrid Log-Gamma.
    Hlg,
    /// ARRI LogC3 at EI 800.
    ArriLogC3,
    /// ARRI LogC4.
    ArriLogC4,
    /// Sony S-Log2.
    SonySLog2,
    /// Sony S-Log3.
    SonySLog3,
    /// Panasonic V-Log.
    PanasonicVLog,
    /// Canon Log 2.
    CanonLog2,
    /// Canon Log 3.
    CanonLog3,
    /// RED Log3G10.
    RedLog3G10,
    /// Apple Log.
    AppleLog,
    /// Blackmagic Film Gen 5.
    BmdFilmGen5,
    /// DaVinci Intermediate.
    DavinciIntermediate,
    /// ACEScc.
    AcesCc,
    /// ACEScct.
    AcesCct,
}

enum Family {
    Display(&'static DisplayPower),
    Pq,
    Hlg,
    LogAffine(&'static LogAffine),
    Canon(&'static CanonLog),
    AppleLog,
    AcesCc,
}

impl Curve {
    /// All curves, in declaration order.
    pub const ALL: [Curve; 17] = [
        Curve::Srgb,
        Curve::Rec709,
        Curve::Pq,
        Curve::Hlg,
        Curve::ArriLogC3,
        Curve::ArriLogC4,
        Curve::SonySLog2,
        Curve::SonySLog3,
        Curve::PanasonicVLog,
        Curve::CanonLog2,
        Curve::CanonLog3,
        Curve::RedLog3G10,
        Curve::AppleLog,
        Curve::BmdFilmGen5,
        Curve::DavinciIntermediate,
        Curve::AcesCc,
        Curve::AcesCct,
    ];

    /// snake_case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Curve::Srgb => "srgb",
            Curve::Rec709 => "rec709",
            Curve::Pq => "pq",
            Curve::Hlg => "hlg",
            Curve::ArriLogC3 => "arri_logc3",
            Curve::ArriLogC4 => "arri_logc4",
            Curve::SonySLog2 => "sony_slog2",
            Curve::SonySLog3 => "sony_slog3",
            Curve::PanasonicVLog => "panasonic_vlog",
            Curve::CanonLog2 => "canon_log2",
            Curve::CanonLog3 => "canon_log3",
            Curve::RedLog3G10 => "red_log3g10",
            Curve::AppleLog => "apple_log",
            Curve::BmdFilmGen5 => "bmd_film_gen5",
            Curve::DavinciIntermediate => "davinci_intermediate",
            Curve::AcesCc => "acescc",
            Curve::AcesCct => "acescct",
        }
    }

    /// Nominal linear domain `(min, max)`: the span the curve is meant to
    /// encode, used for sampling. Input outside it is still accepted.
    pub fn linear_range(self) -> (f32, f32) {
        match self {
            Curve::Srgb | Curve::Rec709 | Curve::Hlg => (0.0, 1.0),
            Curve::Pq => (0.0, 10000.0),
            Curve::ArriLogC3 => (0.0, 55.0),
            Curve::ArriLogC4 => (0.0, 400.0),
            Curve::SonySLog2 => (0.0, 8.0),
            Curve::SonySLog3 => (0.0, 38.0),
            Curve::PanasonicVLog => (0.0, 46.0),
            Curve::CanonLog2 => (0.0, 60.0),
            Curve::CanonLog3 => (0.0, 16.0),
            Curve::RedLog3G10 => (0.0, 180.0),
            Curve::AppleLog => (0.0, 12.0),
            Curve::BmdFilmGen5 => (0.0, 200.0),
            Curve::DavinciIntermediate => (0.0, 100.0),
            Curve::AcesCc | Curve::AcesCct => (0.0, 65504.0),
        }
    }

    fn family(self) -> Family {
        match self {
            Curve::Srgb => Family::Display(&display::SRGB),
            Curve::Rec709 => Family::Display(&display::REC709),
            Curve::Pq => Family::Pq,
            Curve::Hlg => Family::Hlg,
            Curve::ArriLogC3 => Family::LogAffine(&log_affine::ARRI_LOGC3),
            Curve::ArriLogC4 => Family::LogAffine(&log_affine::ARRI_LOGC4),
            Curve::SonySLog2 => Family::LogAffine(&log_affine::SONY_SLOG2),
            Curve::SonySLog3 => Family::LogAffine(&log_affine::SONY_SLOG3),
            Curve::PanasonicVLog => Family::LogAffine(&log_affine::PANASONIC_VLOG),
            Curve::CanonLog2 => Family::Canon(&canon_log::CANON_LOG2),
            Curve::CanonLog3 => Family::Canon(&canon_log::CANON_LOG3),
            Curve::RedLog3G10 => Family::LogAffine(&log_affine::RED_LOG3G10),
            Curve::AppleLog => Family::AppleLog,
            Curve::BmdFilmGen5 => Family::LogAffine(&log_affine::BMD_FILM_GEN5),
            Curve::DavinciIntermediate => Family::LogAffine(&log_affine::DAVINCI_INTERMEDIATE),
            Curve::AcesCc => Family::AcesCc,
            Curve::AcesCct => Family::LogAffine(&log_affine::ACESCCT),
        }
    }

    /// Linear to coded, in f64.
    pub fn encode_f64(self, x: f64) -> f64 {
        match self.family() {
            Family::Display(c) => c.encode(x),
            Family::Pq => pq::encode(x),
            Family::Hlg => hlg::encode(x),
            Family::LogAffine(c) => c.encode(x),
            Family::Canon(c) => c.encode(x),
            Family::AppleLog => apple_log::encode(x),
            Family::AcesCc => acescc::encode(x),
        }
    }

    /// Coded to linear, in f64.
    pub fn decode_f64(self, y: f64) -> f64 {
        match self.family() {
            Family::Display(c) => c.decode(y),
            Family::Pq => pq::decode(y),
            Family::Hlg => hlg::decode(y),
            Family::LogAffine(c) => c.decode(y),
            Family::Canon(c) => c.decode(y),
            Family::AppleLog => apple_log::decode(y),
            Family::AcesCc => acescc::decode(y),
        }
    }

    /// Linear to coded. Evaluated in f64, narrowed once.
    #[inline]
    pub fn encode(self, x: f32) -> f32 {
        self.encode_f64(f64::from(x)) as f32
    }

    /// Coded to linear. Evaluated in f64, narrowed once.
    #[inline]
    pub fn decode(self, y: f32) -> f32 {
        self.decode_f64(f64::from(y)) as f32
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = UnknownCurve;

    /// Accepts [`Curve::name`] plus common short names (`logc3`, `slog3`,
    /// `vlog`, `clog3`, `log3g10`, `st2084`, ...). Case and `-` vs `_` are
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(curve) = Curve::ALL.iter().find(|c| c.name() == key) {
            return Ok(*curve);
        }
        let curve = match key.as_str() {
            "bt709" | "rec_709" => Curve::Rec709,
            "st2084" | "smpte2084" => Curve::Pq,
            "logc" | "logc3" => Curve::ArriLogC3,
            "logc4" => Curve::ArriLogC4,
            "slog2" | "s_log2" => Curve::SonySLog2,
            "slog3" | "s_log3" => Curve::SonySLog3,
            "vlog" | "v_log" => Curve::PanasonicVLog,
            "clog2" | "canon_clog2" => Curve::CanonLog2,
            "clog3" | "canon_clog3" => Curve::CanonLog3,
            "log3g10" => Curve::RedLog3G10,
            "bmdfilm_gen5" => Curve::BmdFilmGen5,
            "davinci" => Curve::DavinciIntermediate,
            _ => return Err(UnknownCurve(s.to_string())),
        };
        Ok(curve)
    }
}

/// Which way a curve is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Linear to coded (OETF / log encode).
    #[default]
    Encode,
    /// Coded to linear.
    Decode,
}

impl Direction {
    /// The other direction.
    pub fn inverse(self) -> Self {
        match self {
            Direction::Encode => Direction::Decode,
            Direction::Decode => Direction::Encode,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownCurve;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encode" | "forward" | "oetf" => Ok(Direction::Encode),
            "decode" | "inverse" | "eotf" => Ok(Direction::Decode),
            _ => Err(UnknownCurve(format!("direction '{}'", s))),
        }
    }
}

/// A curve plus the direction to apply it in.
///
/// ```rust
/// use vfx_transfer::{Curve, CurveSpec};
///
/// let to_linear = CurveSpec::decode(Curve::SonySLog3);
/// let lin = to_linear.apply(420.0 / 1023.0);
/// assert!((lin - 0.18).abs() < 1e-5);
/// assert!((to_linear.inverse().apply(lin) - 420.0 / 1023.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurveSpec {
    /// Curve to evaluate.
    pub curve: Curve,
    /// Direction to evaluate it in.
    pub direction: Direction,
}

impl CurveSpec {
    /// Curve and direction.
    pub const fn new(curve: Curve, direction: Direction) -> Self {
        Self { curve, direction }
    }

    /// Linear to coded.
    pub const fn encode(curve: Curve) -> Self {
        Self::new(curve, Direction::Encode)
    }

    /// Coded to linear.
    pub const fn decode(curve: Curve) -> Self {
        Self::new(curve, Direction::Decode)
    }

    /// Same curve, opposite direction.
    pub fn inverse(self) -> Self {
        Self::new(self.curve, self.direction.inverse())
    }

    /// Applies to one value.
    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        match self.direction {
            Direction::Encode => self.curve.encode(v),
            Direction::Decode => self.curve.decode(v),
        }
    }

    /// Applies to each channel.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|v| self.apply(v))
    }
}

/// Encodes one linear value with `curve`.
#[inline]
pub fn curve_encode(curve: Curve, value: f32) -> f32 {
    curve.encode(value)
}

/// Decodes one coded value with `curve`.
#[inline]
pub fn curve_decode(curve: Curve, value: f32) -> f32 {
    curve.decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(curve: Curve) -> Vec<f32> {
        let (lo, hi) = curve.linear_range();
        let mut xs: Vec<f32> = (0..100).map(|i| lo + (hi - lo) * i as f32 / 99.0).collect();
        // dense in the shadows, where the toe segments live
        xs.extend((-14..=0).map(|e| 2.0_f32.powi(e) * 0.75).filter(|x| *x < hi));
        xs
    }

    #[test]
    fn decode_inverts_encode() {
        for curve in Curve::ALL {
            for x in samples(curve) {
                let back = curve_decode(curve, curve_encode(curve, x));
                assert!(
                    (back - x).abs() <= 1e-4 * x.abs() + 1e-6,
                    "{}: {} -> {} -> {}",
                    curve,
                    x,
                    curve_encode(curve, x),
                    back
                );
            }
        }
    }

    #[test]
    fn encode_is_monotonic() {
        for curve in Curve::ALL {
            let (lo, hi) = curve.linear_range();
            let mut prev = f32::NEG_INFINITY;
            for i in 0..100 {
                let x = lo + (hi - lo) * i as f32 / 99.0;
                let y = curve_encode(curve, x);
                assert!(y >= prev, "{} decreases at {}", curve, x);
                prev = y;
            }
        }
    }

    #[test]
    fn decode_is_monotonic() {
        for curve in Curve::ALL {
            let (lo, hi) = curve.linear_range();
            let (ylo, yhi) = (curve_encode(curve, lo), curve_encode(curve, hi));
            let mut prev = f32::NEG_INFINITY;
            for i in 0..100 {
                let y = ylo + (yhi - ylo) * i as f32 / 99.0;
                let x = curve_decode(curve, y);
                assert!(x >= prev, "{} decode decreases at {}", curve, y);
                prev = x;
            }
        }
    }

    #[test]
    fn extended_domain_is_finite() {
        for curve in Curve::ALL {
            for x in [-1.0_f32, -0.05, -1e-4] {
                assert!(curve_encode(curve, x).is_finite(), "{} at {}", curve, x);
            }
            for y in [-0.5_f32, 0.0, 1.0, 1.2] {
                assert!(curve_decode(curve, y).is_finite(), "{} at {}", curve, y);
            }
        }
    }

    #[test]
    fn names_roundtrip() {
        for curve in Curve::ALL {
            assert_eq!(curve.name().parse::<Curve>().unwrap(), curve);
            assert_eq!(curve.to_string().to_uppercase().parse::<Curve>().unwrap(), curve);
        }
        assert_eq!("S-Log3".parse::<Curve>().unwrap(), Curve::SonySLog3);
        assert_eq!("logc".parse::<Curve>().unwrap(), Curve::ArriLogC3);
        assert_eq!("canon_clog3".parse::<Curve>().unwrap(), Curve::CanonLog3);
        assert!(matches!("gamma22".parse::<Curve>(), Err(UnknownCurve(_))));
    }

    #[test]
    fn directions() {
        assert_eq!("decode".parse::<Direction>().unwrap(), Direction::Decode);
        assert_eq!(Direction::Encode.inverse(), Direction::Decode);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn spec_applies_per_channel() {
        let spec = CurveSpec::encode(Curve::Srgb);
        let rgb = spec.apply_rgb([0.0, 0.18, 1.0]);
        assert_eq!(rgb[0], 0.0);
        assert_eq!(rgb[2], 1.0);
        assert_eq!(rgb[1], curve_encode(Curve::Srgb, 0.18));
    }

    #[test]
    fn documented_boundaries() {
        assert_eq!(curve_encode(Curve::Pq, -1.0), 0.0);
        assert_eq!(curve_encode(Curve::Hlg, -1.0), 0.0);
        assert!(curve_encode(Curve::Srgb, -0.1) < 0.0);
        assert!(curve_encode(Curve::Rec709, -0.1) < 0.0);
        assert_eq!(curve_encode(Curve::AppleLog, -0.5), 0.0);
        assert_eq!(curve_encode(Curve::AcesCc, -0.5), curve_encode(Curve::AcesCc, 0.0));
        assert!(curve_encode(Curve::ArriLogC3, -0.1) < curve_encode(Curve::ArriLogC3, 0.0));
    }
}
