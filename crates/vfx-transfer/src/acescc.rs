//! ACEScc (S-2014-003).
//!
//! Pure log2 above 2^-15. Below that the input is halved and lifted by
//! 2^-16 before the log, so small values stay finite, and everything at or
//! below zero encodes to the 2^-16 floor, about -0.3584. Decode saturates
//! at the half-float maximum, 65504.

const SCALE: f64 = 17.52;
const OFFSET: f64 = 9.72;
/// 2^-16
const FLOOR: f64 = 1.0 / 65536.0;
/// 2^-15
const SMALL: f64 = 1.0 / 32768.0;
/// Largest finite half float.
const HALF_MAX: f64 = 65504.0;

/// ACES linear to ACEScc.
#[inline]
pub fn encode(x: f64) -> f64 {
    let l = if x <= 0.0 {
        FLOOR.log2()
    } else if x < SMALL {
        (FLOOR + x * 0.5).log2()
    } else {
        x.log2()
    };
    (l + OFFSET) / SCALE
}

/// ACEScc to ACES linear.
#[inline]
pub fn decode(v: f64) -> f64 {
    let lin = (v * SCALE - OFFSET).exp2();
    if v < (OFFSET - 15.0) / SCALE {
        (lin - FLOOR) * 2.0
    } else if v < (HALF_MAX.log2() + OFFSET) / SCALE {
        lin
    } else {
        HALF_MAX
    }
}
