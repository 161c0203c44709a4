//! Curve lookup errors.

use thiserror::Error;

/// A curve name that does not match any [`Curve`](crate::Curve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transfer curve: {0}")]
pub struct UnknownCurve(pub String);
