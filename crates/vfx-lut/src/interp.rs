//! Interpolation methods for LUT evaluation.

use std::fmt;
use std::str::FromStr;

use crate::LutError;

/// Interpolation method for 3D LUT evaluation.
///
/// 1D LUTs always interpolate linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest grid node.
    Nearest,

    /// Trilinear: blue axis first, then green, then red.
    #[default]
    Linear,

    /// Tetrahedral: one of six tetrahedra per cell.
    Tetrahedral,
}

impl Interpolation {
    /// Lowercase name used in pipeline descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Tetrahedral => "tetrahedral",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" | "trilinear" => Ok(Self::Linear),
            "tetrahedral" | "tetra" => Ok(Self::Tetrahedral),
            other => Err(LutError::ParseError(format!(
                "unknown interpolation: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for interp in [
            Interpolation::Nearest,
            Interpolation::Linear,
            Interpolation::Tetrahedral,
        ] {
            assert_eq!(interp.name().parse::<Interpolation>().unwrap(), interp);
        }
        assert_eq!("Trilinear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
        assert!("cubic".parse::<Interpolation>().is_err());
    }
}
