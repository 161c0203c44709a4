//! Polynomial coefficients and float layout constants.
//!
//! Coefficients are stored lowest order first. Both tables are the minimax
//! fits OCIO ships in `SSE.h`; changing a single digit breaks parity.

/// log2(m) for m in [1, 2), degree 5. Roughly 15 bits of mantissa precision.
pub(crate) const LOG2_COEFFS: [f32; 6] = [
    -2.800364054395965731506,
    5.091710879305474367557,
    -3.550793018041176193407,
    1.631148826119436277100,
    -4.165637071209677112635e-1,
    4.487361286440374006195e-2,
];

/// 2^f for f in [0, 1), degree 4.
pub(crate) const EXP2_COEFFS: [f32; 5] = [
    1.000002593370603213644,
    6.930038344665415134202e-1,
    2.414427569091865207710e-1,
    5.201146058412685018921e-2,
    1.353416792833547468620e-2,
];

pub(crate) const EXP_MASK: i32 = 0x7F80_0000;
pub(crate) const EXP_BIAS: i32 = 127;
pub(crate) const EXP_SHIFT: i32 = 23;

/// exp2 inputs below this underflow to zero.
pub(crate) const EXP2_MIN: f32 = -126.0;
/// exp2 inputs at or above this overflow to infinity.
pub(crate) const EXP2_MAX: f32 = 128.0;

/// Horner evaluation, highest coefficient first: `c0 + x*(c1 + x*(...))`.
#[inline(always)]
pub(crate) fn horner<const N: usize>(coeffs: &[f32; N], x: f32) -> f32 {
    let mut acc = coeffs[N - 1];
    for &c in coeffs[..N - 1].iter().rev() {
        acc = c + x * acc;
    }
    acc
}
