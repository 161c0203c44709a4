//! Pixel representation and luma weights.
//!
//! Pixels are bare `[f32; 3]` triples. Alpha is never part of a transform:
//! buffer-level code carries it alongside and copies it through untouched.

/// An RGB pixel of 32-bit floats.
pub type Rgb = [f32; 3];

// ============================================================================
// Rec.709 Luminance Constants
// ============================================================================

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Rec.709 luma of an RGB triple.
///
/// Each channel is weighted first and the products are summed left to right.
/// CDL saturation depends on this exact evaluation order.
///
/// # Example
/// ```
/// use vfx_core::luma_rec709;
/// let luma = luma_rec709([0.5, 0.3, 0.2]);
/// assert!((luma - 0.3353).abs() < 0.0001);
/// ```
#[inline]
pub fn luma_rec709(rgb: Rgb) -> f32 {
    let wr = rgb[0] * REC709_LUMA_R;
    let wg = rgb[1] * REC709_LUMA_G;
    let wb = rgb[2] * REC709_LUMA_B;
    wr + wg + wb
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn weights_sum_to_one() {
        assert_abs_diff_eq!(REC709_LUMA.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn white_and_black() {
        assert_abs_diff_eq!(luma_rec709([1.0, 1.0, 1.0]), 1.0, epsilon = 1e-6);
        assert_eq!(luma_rec709([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn green_dominates() {
        assert!(luma_rec709([0.0, 1.0, 0.0]) > luma_rec709([1.0, 0.0, 1.0]));
    }
}
