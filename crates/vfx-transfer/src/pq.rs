//! SMPTE ST 2084 Perceptual Quantizer.
//!
//! Linear values are absolute luminance in cd/m2, 0 to 10000. Encode clamps
//! luminance above 10000 to the peak; both directions map non-positive input
//! to 0.
//!
//! ```rust
//! use vfx_transfer::{curve_decode, curve_encode, Curve};
//!
//! let signal = curve_encode(Curve::Pq, 100.0);
//! assert!((signal - 0.508).abs() < 1e-3);
//! assert!((curve_decode(Curve::Pq, signal) - 100.0).abs() < 1e-2);
//! ```

/// Peak luminance in cd/m2.
pub const L_MAX: f64 = 10000.0;

const M1: f64 = 2610.0 / 16384.0;
const M2: f64 = 2523.0 / 4096.0 * 128.0;
const C1: f64 = 3424.0 / 4096.0;
const C2: f64 = 2413.0 / 4096.0 * 32.0;
const C3: f64 = 2392.0 / 4096.0 * 32.0;

/// Luminance (nits) to PQ signal.
#[inline]
pub fn encode(nits: f64) -> f64 {
    if nits <= 0.0 {
        return 0.0;
    }
    let yp = (nits / L_MAX).min(1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// PQ signal to luminance (nits).
#[inline]
pub fn decode(signal: f64) -> f64 {
    if signal <= 0.0 {
        return 0.0;
    }
    let vp = signal.powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    L_MAX * (num / (C2 - C3 * vp)).powf(1.0 / M1)
}
