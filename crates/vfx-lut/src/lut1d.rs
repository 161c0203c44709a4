//! 1-dimensional lookup table.
//!
//! A 1D LUT applies an independent curve to each channel: shapers,
//! log-to-display conversions, per-channel calibration.

use crate::{LutError, LutResult};

#[derive(Debug, Clone, PartialEq)]
enum Tables {
    Mono(Vec<f32>),
    Rgb([Vec<f32>; 3]),
}

/// A 1-dimensional lookup table.
///
/// Holds one table shared by all channels, or one table per channel, each
/// with at least two entries. Input is normalized by the domain, clamped to
/// [0, 1], and interpolated linearly between the two bracketing entries.
///
/// # Example
///
/// ```rust
/// use vfx_lut::Lut1D;
///
/// let lut = Lut1D::new(vec![0.0, 0.25, 1.0]).unwrap();
/// assert_eq!(lut.apply(0.5), 0.25);
/// assert_eq!(lut.apply(0.75), 0.625);
/// assert_eq!(lut.apply(2.0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1D {
    tables: Tables,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
}

impl Lut1D {
    /// Creates a mono LUT from a single table broadcast to all channels.
    ///
    /// Fails with [`LutError::InvalidSize`] if `data` has fewer than 2
    /// entries.
    pub fn new(data: Vec<f32>) -> LutResult<Self> {
        check_len(data.len(), "LUT")?;
        Ok(Self {
            tables: Tables::Mono(data),
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        })
    }

    /// Creates a LUT with separate red, green and blue tables of equal length.
    pub fn from_rgb(r: Vec<f32>, g: Vec<f32>, b: Vec<f32>) -> LutResult<Self> {
        check_len(r.len(), "red table")?;
        if g.len() != r.len() || b.len() != r.len() {
            return Err(LutError::InvalidSize(format!(
                "channel tables differ in length: {} / {} / {}",
                r.len(),
                g.len(),
                b.len()
            )));
        }
        Ok(Self {
            tables: Tables::Rgb([r, g, b]),
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        })
    }

    /// Identity ramp with `size` entries.
    pub fn identity(size: usize) -> LutResult<Self> {
        check_len(size, "LUT")?;
        let last = (size - 1) as f32;
        Self::new((0..size).map(|i| i as f32 / last).collect())
    }

    /// Sets the per-channel input domain. Each `max` must exceed its `min`.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> LutResult<Self> {
        for c in 0..3 {
            // written so NaN bounds fail too
            if !(max[c] > min[c]) {
                return Err(LutError::InvalidRange {
                    min: min[c],
                    max: max[c],
                });
            }
        }
        self.domain_min = min;
        self.domain_max = max;
        Ok(self)
    }

    /// Number of entries per channel.
    #[inline]
    pub fn size(&self) -> usize {
        match &self.tables {
            Tables::Mono(t) => t.len(),
            Tables::Rgb([r, _, _]) => r.len(),
        }
    }

    /// True if one table serves all channels.
    #[inline]
    pub fn is_mono(&self) -> bool {
        matches!(self.tables, Tables::Mono(_))
    }

    /// Table used for channel `c` (0 = red).
    pub fn channel(&self, c: usize) -> &[f32] {
        match &self.tables {
            Tables::Mono(t) => t,
            Tables::Rgb(t) => &t[c.min(2)],
        }
    }

    /// Input domain minimum.
    pub fn domain_min(&self) -> [f32; 3] {
        self.domain_min
    }

    /// Input domain maximum.
    pub fn domain_max(&self) -> [f32; 3] {
        self.domain_max
    }

    /// Looks up a single value through the red (or mono) table.
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        self.lookup(0, value)
    }

    /// Looks up each channel through its own table.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            self.lookup(0, rgb[0]),
            self.lookup(1, rgb[1]),
            self.lookup(2, rgb[2]),
        ]
    }

    #[inline]
    fn lookup(&self, c: usize, value: f32) -> f32 {
        let table = self.channel(c);
        let last = table.len() - 1;

        let t = ((value - self.domain_min[c]) / (self.domain_max[c] - self.domain_min[c]))
            .clamp(0.0, 1.0);
        let idx = t * last as f32;

        // NaN casts to 0 and carries through frac
        let low = (idx.floor() as usize).min(last);
        let high = (low + 1).min(last);
        let frac = idx - low as f32;

        table[low] * (1.0 - frac) + table[high] * frac
    }
}

fn check_len(len: usize, what: &str) -> LutResult<()> {
    if len < 2 {
        return Err(LutError::InvalidSize(format!(
            "{} needs at least 2 entries, got {}",
            what, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_short_tables() {
        assert!(matches!(Lut1D::new(vec![]), Err(LutError::InvalidSize(_))));
        assert!(matches!(Lut1D::new(vec![0.5]), Err(LutError::InvalidSize(_))));
        assert!(Lut1D::identity(1).is_err());
        assert!(Lut1D::from_rgb(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0]).is_err());
    }

    #[test]
    fn identity_passes_through() {
        let lut = Lut1D::identity(1024).unwrap();
        for i in 0..=100 {
            let x = i as f32 / 100.0;
            assert_abs_diff_eq!(lut.apply(x), x, epsilon = 1e-6);
        }
    }

    #[test]
    fn clamps_outside_unit_range() {
        let lut = Lut1D::new(vec![0.1, 0.2, 0.9]).unwrap();
        assert_eq!(lut.apply(-5.0), 0.1);
        assert_eq!(lut.apply(1.0), 0.9);
        assert_eq!(lut.apply(7.0), 0.9);
    }

    #[test]
    fn interpolates_between_entries() {
        let lut = Lut1D::new(vec![0.0, 0.5, 0.6, 1.0]).unwrap();
        // idx = 0.5 * 3 = 1.5 -> halfway between 0.5 and 0.6
        assert_abs_diff_eq!(lut.apply(0.5), 0.55, epsilon = 1e-6);
    }

    #[test]
    fn mono_broadcasts() {
        let lut = Lut1D::new(vec![1.0, 0.0]).unwrap();
        assert!(lut.is_mono());
        assert_eq!(lut.apply_rgb([0.0, 1.0, 0.25]), [1.0, 0.0, 0.75]);
    }

    #[test]
    fn per_channel_tables() {
        let lut = Lut1D::from_rgb(vec![0.0, 1.0], vec![0.0, 0.5], vec![1.0, 0.0]).unwrap();
        assert!(!lut.is_mono());
        assert_eq!(lut.apply_rgb([0.5, 0.5, 0.5]), [0.5, 0.25, 0.5]);
    }

    #[test]
    fn domain_normalizes_input() {
        let lut = Lut1D::identity(5)
            .unwrap()
            .with_domain([-1.0; 3], [3.0; 3])
            .unwrap();
        assert_abs_diff_eq!(lut.apply(1.0), 0.5, epsilon = 1e-6);
        assert_eq!(lut.apply(-2.0), 0.0);

        let err = Lut1D::identity(2).unwrap().with_domain([0.0; 3], [1.0, 0.0, 1.0]);
        assert!(matches!(err, Err(LutError::InvalidRange { .. })));
    }

    #[test]
    fn nan_propagates() {
        let lut = Lut1D::identity(16).unwrap();
        assert!(lut.apply(f32::NAN).is_nan());
    }
}
