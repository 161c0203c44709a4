//! Apple Log (iPhone 15 Pro and later).
//!
//! Three segments:
//!
//! ```text
//! x <= R0:          0
//! R0 < x < Rt:      c (x - R0)^2
//! x >= Rt:          gamma log2(x + beta) + delta
//! ```
//!
//! Decode switches to the log segment at `P_t = c (Rt - R0)^2`, inverts the
//! square segment between 0 and `P_t`, and returns `R0` for negative codes.

const R_0: f64 = -0.05641088;
const R_T: f64 = 0.01;
const C: f64 = 47.28711236;
const BETA: f64 = 0.00964052;
const GAMMA: f64 = 0.08550479;
const DELTA: f64 = 0.69336945;

/// Coded value where the log segment starts.
#[inline]
pub fn p_t() -> f64 {
    C * (R_T - R_0) * (R_T - R_0)
}

/// Linear to Apple Log.
#[inline]
pub fn encode(x: f64) -> f64 {
    if x <= R_0 {
        0.0
    } else if x < R_T {
        C * (x - R_0) * (x - R_0)
    } else {
        GAMMA * (x + BETA).log2() + DELTA
    }
}

/// Apple Log to linear.
#[inline]
pub fn decode(v: f64) -> f64 {
    if v >= p_t() {
        ((v - DELTA) / GAMMA).exp2() - BETA
    } else if v >= 0.0 {
        (v / C).sqrt() + R_0
    } else {
        R_0
    }
}
