//! Scalar approximations.

use crate::poly::{
    horner, EXP2_COEFFS, EXP2_MAX, EXP2_MIN, EXP_BIAS, EXP_MASK, EXP_SHIFT, LOG2_COEFFS,
};

/// Approximate `log2(x)`.
///
/// The exponent field is swapped for the bias so the remaining bits read as
/// a mantissa in [1, 2); the polynomial handles that part and the unbiased
/// exponent is added back as an integer.
///
/// Returns `-inf` for `x <= 0`. `+inf` is not special-cased: its exponent
/// field reads as 2^128, so the result is about `128.0`, and `pow_approx`
/// still overflows to `+inf` for exponents of 1 or more. NaN compares false
/// and falls through to the bit path, so it yields a finite but meaningless
/// value, as in OCIO.
#[inline]
pub fn log2_approx(x: f32) -> f32 {
    if x <= 0.0 {
        return f32::NEG_INFINITY;
    }

    let bits = x.to_bits() as i32;
    let mantissa = f32::from_bits(((bits & !EXP_MASK) | (EXP_BIAS << EXP_SHIFT)) as u32);
    let exponent = ((bits & EXP_MASK) >> EXP_SHIFT) - EXP_BIAS;

    horner(&LOG2_COEFFS, mantissa) + exponent as f32
}

/// Approximate `2^x`.
///
/// Returns `0` for `x < -126` and `+inf` for `x >= 128`.
#[inline]
pub fn exp2_approx(x: f32) -> f32 {
    if x < EXP2_MIN {
        return 0.0;
    }
    if x >= EXP2_MAX {
        return f32::INFINITY;
    }

    // floor, not truncation: -0.5 must land on -1
    let whole = x.floor() as i32;
    let fraction = x - whole as f32;

    let scale = f32::from_bits(((whole + EXP_BIAS) << EXP_SHIFT) as u32);
    scale * horner(&EXP2_COEFFS, fraction)
}

/// Approximate `base^exp` as `exp2(exp * log2(base))`.
///
/// Returns `0` for `base <= 0`, which makes `pow_approx(0, p) == 0` for any
/// positive `p`.
///
/// # Example
///
/// ```rust
/// use vfx_fastmath::pow_approx;
///
/// let fast = pow_approx(0.7571428418, 1.2);
/// let libm = 0.7571428418_f32.powf(1.2);
/// assert!((fast - libm).abs() > 1e-6);
/// assert!((fast - libm).abs() / libm < 1e-4);
/// ```
#[inline]
pub fn pow_approx(base: f32, exp: f32) -> f32 {
    if base <= 0.0 {
        return 0.0;
    }
    exp2_approx(exp * log2_approx(base))
}
