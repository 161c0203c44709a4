//! CDL parameters and the per-pixel operator.

use std::fmt;
use std::str::FromStr;

use vfx_core::{luma_rec709, Rgb};
use vfx_fastmath::pow_approx;

use crate::CdlError;

/// Saturation values within this distance of 1.0 skip the saturation stage.
///
/// A saturation of `1.0 + 5e-7` is treated as identity.
pub const SAT_EPSILON: f32 = 1e-6;

/// Clamping behavior of the CDL operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CdlStyle {
    /// ASC CDL v1.2: clamp to [0, 1] before power and after saturation.
    ///
    /// Matches OCIO `CDL_ASC` / `CDL_V1_2_FWD`.
    #[default]
    Asc,
    /// No clamping. Negative values skip the power stage and pass through;
    /// NaN after slope/offset becomes 0.
    ///
    /// Matches OCIO `CDL_NO_CLAMP`.
    NoClamp,
}

impl CdlStyle {
    /// Config-file name of this style.
    pub fn name(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::NoClamp => "no_clamp",
        }
    }
}

impl fmt::Display for CdlStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CdlStyle {
    type Err = CdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "cdl_asc" | "v1_2" => Ok(Self::Asc),
            "no_clamp" | "noclamp" | "cdl_no_clamp" => Ok(Self::NoClamp),
            other => Err(CdlError::UnknownStyle(other.to_string())),
        }
    }
}

/// Direction of the CDL operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CdlDirection {
    /// slope, offset, power, saturation.
    #[default]
    Forward,
    /// Inverse saturation, inverse power, then undo offset and slope.
    Reverse,
}

/// ASC CDL slope/offset/power/saturation.
///
/// Values are not range checked. `power <= 0` and `slope == 0` (reverse only)
/// are caller errors and produce unspecified output.
///
/// # Example
///
/// ```rust
/// use vfx_cdl::CdlParams;
///
/// let cdl = CdlParams::new()
///     .with_slope([1.1, 1.0, 0.9])
///     .with_offset([0.02, 0.0, -0.02])
///     .with_saturation(1.1);
///
/// let out = cdl.apply([0.5, 0.4, 0.3]);
/// assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdlParams {
    /// Slope (multiply) per channel [R, G, B].
    pub slope: [f32; 3],
    /// Offset (add) per channel [R, G, B].
    pub offset: [f32; 3],
    /// Power (exponent) per channel [R, G, B].
    pub power: [f32; 3],
    /// Saturation (1.0 = no change).
    pub saturation: f32,
}

impl Default for CdlParams {
    fn default() -> Self {
        Self::new()
    }
}

impl CdlParams {
    /// Identity parameters.
    pub const fn new() -> Self {
        Self {
            slope: [1.0; 3],
            offset: [0.0; 3],
            power: [1.0; 3],
            saturation: 1.0,
        }
    }

    /// Sets the slope.
    pub fn with_slope(mut self, slope: [f32; 3]) -> Self {
        self.slope = slope;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: [f32; 3]) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the power.
    pub fn with_power(mut self, power: [f32; 3]) -> Self {
        self.power = power;
        self
    }

    /// Sets the saturation.
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// True when every parameter is at its identity value.
    pub fn is_identity(&self) -> bool {
        self.slope == [1.0; 3]
            && self.offset == [0.0; 3]
            && self.power == [1.0; 3]
            && !self.has_saturation()
    }

    #[inline]
    fn has_saturation(&self) -> bool {
        (self.saturation - 1.0).abs() > SAT_EPSILON
    }

    /// Forward ASC CDL with clamping.
    ///
    /// Slope and offset, clamp to [0, 1], power (skipped where it is exactly
    /// 1.0), Rec.709 saturation, clamp to [0, 1]. The clamp before power
    /// keeps the base non-negative, so negative intermediates end at 0.
    /// Every clamp maps NaN to 0, so the output is always inside [0, 1].
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let v = clamp_unit(rgb[c] * self.slope[c] + self.offset[c]);
            out[c] = self.power_stage(v, c);
        }
        if self.has_saturation() {
            out = saturate(out, self.saturation);
        }
        out.map(clamp_unit)
    }

    /// Forward CDL without clamping.
    #[inline]
    pub fn apply_no_clamp(&self, rgb: Rgb) -> Rgb {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            let v = rgb[c] * self.slope[c] + self.offset[c];
            out[c] = if v.is_nan() {
                0.0
            } else if v < 0.0 {
                v
            } else {
                self.power_stage(v, c)
            };
        }
        if self.has_saturation() {
            out = saturate(out, self.saturation);
        }
        out
    }

    /// Reverse ASC CDL with clamping.
    ///
    /// Undoes [`apply`](Self::apply) for values it can produce: clamp,
    /// saturation by `1/sat`, clamp, power by `1/power`, subtract offset and
    /// divide by slope, clamp.
    pub fn apply_reverse(&self, rgb: Rgb) -> Rgb {
        let mut out = rgb.map(clamp_unit);
        if self.has_saturation() {
            out = saturate(out, 1.0 / self.saturation).map(clamp_unit);
        }
        for c in 0..3 {
            let v = self.inverse_power_stage(out[c], c);
            out[c] = clamp_unit((v - self.offset[c]) / self.slope[c]);
        }
        out
    }

    /// Reverse CDL without clamping.
    pub fn apply_reverse_no_clamp(&self, rgb: Rgb) -> Rgb {
        let mut out = rgb;
        if self.has_saturation() {
            out = saturate(out, 1.0 / self.saturation);
        }
        for c in 0..3 {
            let v = if out[c] > 0.0 {
                self.inverse_power_stage(out[c], c)
            } else {
                out[c]
            };
            out[c] = (v - self.offset[c]) / self.slope[c];
        }
        out
    }

    /// Applies the operator selected by `style` and `direction`.
    #[inline]
    pub fn apply_with(&self, rgb: Rgb, style: CdlStyle, direction: CdlDirection) -> Rgb {
        match (style, direction) {
            (CdlStyle::Asc, CdlDirection::Forward) => self.apply(rgb),
            (CdlStyle::NoClamp, CdlDirection::Forward) => self.apply_no_clamp(rgb),
            (CdlStyle::Asc, CdlDirection::Reverse) => self.apply_reverse(rgb),
            (CdlStyle::NoClamp, CdlDirection::Reverse) => self.apply_reverse_no_clamp(rgb),
        }
    }

    /// Applies the clamped forward operator to every pixel in place.
    pub fn apply_buffer(&self, pixels: &mut [Rgb]) {
        for pixel in pixels {
            *pixel = self.apply(*pixel);
        }
    }

    #[inline]
    fn power_stage(&self, v: f32, c: usize) -> f32 {
        if self.power[c] == 1.0 {
            v
        } else {
            pow_approx(v, self.power[c])
        }
    }

    #[inline]
    fn inverse_power_stage(&self, v: f32, c: usize) -> f32 {
        if self.power[c] == 1.0 {
            v
        } else {
            pow_approx(v, 1.0 / self.power[c])
        }
    }
}

/// Clamp to [0, 1] with NaN mapped to 0.
#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// `luma + sat * (c - luma)` with Rec.709 weights.
#[inline]
fn saturate(rgb: Rgb, sat: f32) -> Rgb {
    let luma = luma_rec709(rgb);
    rgb.map(|c| luma + sat * (c - luma))
}
