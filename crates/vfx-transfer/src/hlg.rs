//! ITU-R BT.2100 Hybrid Log-Gamma OETF and its inverse.
//!
//! Linear values are relative scene light in [0, 1]. The square-root segment
//! runs up to 1/12 (signal 0.5), the log segment above it. Non-positive input
//! maps to 0 in both directions.

const A: f64 = 0.17883277;
const B: f64 = 0.28466892; // 1 - 4A
const C: f64 = 0.55991073; // 0.5 - A ln(4A)

/// Scene light to HLG signal.
#[inline]
pub fn encode(e: f64) -> f64 {
    if e <= 0.0 {
        0.0
    } else if e <= 1.0 / 12.0 {
        (3.0 * e).sqrt()
    } else {
        A * (12.0 * e - B).ln() + C
    }
}

/// HLG signal to scene light.
#[inline]
pub fn decode(v: f64) -> f64 {
    if v <= 0.0 {
        0.0
    } else if v <= 0.5 {
        v * v / 3.0
    } else {
        (((v - C) / A).exp() + B) / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn segments_meet_at_one_twelfth() {
        assert_abs_diff_eq!(encode(1.0 / 12.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(A * (1.0 - B).ln() + C, 0.5, epsilon = 1e-7);
    }

    #[test]
    fn peak_and_negatives() {
        assert_abs_diff_eq!(encode(1.0), 1.0, epsilon = 1e-7);
        assert_eq!(encode(-0.2), 0.0);
        assert_eq!(decode(-0.2), 0.0);
    }
}
