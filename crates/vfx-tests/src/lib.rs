//! # vfx-tests
//!
//! Cross-crate parity tests for the color core.
//!
//! The [`golden`] module rebuilds the reference inputs, hashes results and
//! loads `tests/golden/hashes.json`. The tests in this crate run the CDL,
//! matrix, curve and pipeline paths over those inputs and compare hashes, so
//! any change to rounding, clamping or evaluation order shows up as a
//! mismatch.
//!
//! ```bash
//! cargo test -p vfx-tests
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod golden;
