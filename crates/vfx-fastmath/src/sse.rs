//! SSE2 kernels, four lanes at a time.
//!
//! These follow OCIO's `sseLog2`/`sseExp2`/`ssePower` instruction for
//! instruction. The one visible difference from the scalar path is the floor
//! in [`exp2_x4`]: it truncates and subtracts one for negative lanes, so an
//! exactly negative integer input lands one bucket lower with a fraction of
//! 1.0. For all other inputs both paths agree bit for bit.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::poly::{EXP2_COEFFS, EXP2_MAX, EXP2_MIN, EXP_BIAS, EXP_MASK, EXP_SHIFT, LOG2_COEFFS};

#[inline(always)]
unsafe fn horner_x4<const N: usize>(coeffs: &[f32; N], x: __m128) -> __m128 {
    let mut acc = _mm_set1_ps(coeffs[N - 1]);
    for &c in coeffs[..N - 1].iter().rev() {
        acc = _mm_add_ps(_mm_mul_ps(acc, x), _mm_set1_ps(c));
    }
    acc
}

/// Four-lane [`crate::log2_approx`] without the `x <= 0` sentinel.
///
/// Non-positive lanes produce garbage; [`pow_x4`] masks them out.
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn log2_x4(x: __m128) -> __m128 {
    let emask = _mm_set1_epi32(EXP_MASK);

    let mantissa = _mm_or_ps(
        _mm_andnot_ps(_mm_castsi128_ps(emask), x),
        _mm_set1_ps(1.0),
    );
    let poly = horner_x4(&LOG2_COEFFS, mantissa);

    let exponent = _mm_sub_epi32(
        _mm_srli_epi32::<EXP_SHIFT>(_mm_and_si128(_mm_castps_si128(x), emask)),
        _mm_set1_epi32(EXP_BIAS),
    );

    _mm_add_ps(poly, _mm_cvtepi32_ps(exponent))
}

/// Four-lane [`crate::exp2_approx`].
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn exp2_x4(x: __m128) -> __m128 {
    // truncate, then subtract one where x < 0 (the mask is all ones = -1)
    let whole = _mm_add_epi32(
        _mm_cvttps_epi32(x),
        _mm_castps_si128(_mm_cmpnle_ps(_mm_setzero_ps(), x)),
    );

    let scale = _mm_castsi128_ps(_mm_slli_epi32::<EXP_SHIFT>(_mm_add_epi32(
        whole,
        _mm_set1_epi32(EXP_BIAS),
    )));
    let fraction = _mm_sub_ps(x, _mm_cvtepi32_ps(whole));

    let mut out = _mm_mul_ps(scale, horner_x4(&EXP2_COEFFS, fraction));

    out = _mm_andnot_ps(_mm_cmplt_ps(x, _mm_set1_ps(EXP2_MIN)), out);

    let overflow = _mm_cmpge_ps(x, _mm_set1_ps(EXP2_MAX));
    _mm_or_ps(
        _mm_and_ps(overflow, _mm_set1_ps(f32::INFINITY)),
        _mm_andnot_ps(overflow, out),
    )
}

/// Four-lane [`crate::pow_approx`]. Lanes with `base <= 0` return 0.
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn pow_x4(base: __m128, exp: __m128) -> __m128 {
    let values = exp2_x4(_mm_mul_ps(exp, log2_x4(base)));
    _mm_and_ps(values, _mm_cmpgt_ps(base, _mm_setzero_ps()))
}

/// Applies [`pow_x4`] to the first four values of `values`.
///
/// # Safety
///
/// The CPU must support SSE2 and `values` must hold at least four elements.
#[target_feature(enable = "sse2")]
pub unsafe fn pow_x4_in_place(values: &mut [f32], exp: f32) {
    debug_assert!(values.len() >= 4);
    let ptr = values.as_mut_ptr();
    let v = _mm_loadu_ps(ptr);
    _mm_storeu_ps(ptr, pow_x4(v, _mm_set1_ps(exp)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{exp2_approx, log2_approx, pow_approx};

    fn lanes(v: __m128) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
        out
    }

    fn load(values: [f32; 4]) -> __m128 {
        unsafe { _mm_loadu_ps(values.as_ptr()) }
    }

    #[test]
    fn log2_matches_scalar() {
        let input = [0.125, 0.7, 1.0, 3.9];
        let got = lanes(unsafe { log2_x4(load(input)) });
        for (g, x) in got.iter().zip(input) {
            assert_eq!(g.to_bits(), log2_approx(x).to_bits());
        }
    }

    #[test]
    fn exp2_matches_scalar_off_integers() {
        let input = [-3.7, -0.25, 0.5, 5.125];
        let got = lanes(unsafe { exp2_x4(load(input)) });
        for (g, x) in got.iter().zip(input) {
            assert_eq!(g.to_bits(), exp2_approx(x).to_bits());
        }
    }

    #[test]
    fn exp2_sentinels() {
        let got = lanes(unsafe { exp2_x4(load([-127.0, -500.0, 128.0, 300.0])) });
        assert_eq!(got[0], 0.0);
        assert_eq!(got[1], 0.0);
        assert_eq!(got[2], f32::INFINITY);
        assert_eq!(got[3], f32::INFINITY);
    }

    #[test]
    fn pow_matches_scalar_over_cdl_range() {
        for e in [0.5_f32, 0.8, 1.2, 1.7, 2.2, 2.4] {
            for i in (1..=96).step_by(4) {
                let input = [
                    i as f32 / 64.0,
                    (i + 1) as f32 / 64.0,
                    (i + 2) as f32 / 64.0,
                    (i + 3) as f32 / 64.0,
                ];
                let got = lanes(unsafe { pow_x4(load(input), _mm_set1_ps(e)) });
                for (g, b) in got.iter().zip(input) {
                    assert_eq!(g.to_bits(), pow_approx(b, e).to_bits(), "{}^{}", b, e);
                }
            }
        }
    }

    #[test]
    fn pow_masks_non_positive() {
        let got = lanes(unsafe { pow_x4(load([0.0, -1.0, -0.0, 0.5]), _mm_set1_ps(2.0)) });
        assert_eq!(&got[..3], &[0.0, 0.0, 0.0]);
        assert!((got[3] - 0.25).abs() < 1e-4);
    }
}
