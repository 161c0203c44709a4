//! # vfx-fastmath
//!
//! Polynomial `log2`/`exp2`/`pow` that reproduce OpenColorIO's SSE math.
//!
//! OCIO's CPU renderer evaluates the CDL power stage with Chebyshev
//! polynomial approximations instead of the C library `powf`. The two differ
//! by 1e-6 to 1e-4, which is enough to change hashed output. Every function
//! here performs the same f32 operations in the same order as OCIO, so
//! results agree bit for bit.
//!
//! # Functions
//!
//! - [`log2_approx`] - mantissa polynomial plus exponent, `-inf` for `x <= 0`
//! - [`exp2_approx`] - fraction polynomial times `2^floor(x)`, `0` below
//!   `-126`, `+inf` from `128`
//! - [`pow_approx`] - `exp2(exp * log2(base))`, `0` for `base <= 0`
//! - [`pow_slice`] - in-place pow over a slice, four lanes at a time on x86_64
//!
//! On x86/x86_64 the [`sse`] module exposes the 4-lane `__m128` kernels.
//!
//! # Example
//!
//! ```rust
//! use vfx_fastmath::pow_approx;
//!
//! let v = pow_approx(0.5, 2.0);
//! assert!((v - 0.25).abs() < 1e-4);
//! assert_eq!(pow_approx(0.0, 1.2), 0.0);
//! ```
//!
//! # Used By
//!
//! - `vfx-cdl` - the ASC CDL power stage

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod poly;
mod scalar;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse;

pub use scalar::{exp2_approx, log2_approx, pow_approx};

/// Raises every value in `values` to `exp` in place.
///
/// Bit-identical to calling [`pow_approx`] per element for finite inputs.
/// On x86_64 the bulk of the slice goes through the SSE2 kernel and the
/// tail through the scalar path.
pub fn pow_slice(values: &mut [f32], exp: f32) {
    #[cfg(target_arch = "x86_64")]
    {
        let mut chunks = values.chunks_exact_mut(4);
        for chunk in &mut chunks {
            // SAFETY: SSE2 is part of the x86_64 baseline and the chunk holds
            // exactly four f32 values.
            unsafe { sse::pow_x4_in_place(chunk, exp) };
        }
        for v in chunks.into_remainder() {
            *v = pow_approx(*v, exp);
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    for v in values.iter_mut() {
        *v = pow_approx(*v, exp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_matches_scalar() {
        // Covers the 4-lane body and a 3-element tail.
        let mut values: Vec<f32> = (1..=67).map(|i| i as f32 / 64.0).collect();
        let expected: Vec<f32> = values.iter().map(|&v| pow_approx(v, 1.2)).collect();

        pow_slice(&mut values, 1.2);

        for (got, want) in values.iter().zip(&expected) {
            assert_eq!(got.to_bits(), want.to_bits());
        }
    }

    #[test]
    fn slice_zero_and_negative() {
        let mut values = [0.0, -0.5, 0.25, -0.0];
        pow_slice(&mut values, 2.0);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 0.0);
        assert!((values[2] - 0.0625).abs() < 1e-4);
        assert_eq!(values[3], 0.0);
    }
}
