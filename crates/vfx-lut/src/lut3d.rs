//! 3-dimensional lookup table.
//!
//! A 3D LUT maps RGB to RGB through a cube of samples, for looks, display
//! calibration and gamut conversions that do not separate per channel.
//!
//! # Memory layout
//!
//! Nodes are stored blue-fastest: the flat offset of node `(r, g, b)` is
//! `3 * (b + size * (g + size * r))`. Corner fetches, the blue-green-red
//! trilinear order and the tetrahedral comparisons all assume this layout;
//! changing any of them moves results at cell diagonals.

use crate::{Interpolation, LutError, LutResult};

/// A 3-dimensional lookup table.
///
/// # Example
///
/// ```rust
/// use vfx_lut::{Interpolation, Lut3D};
///
/// let lut = Lut3D::identity(17)
///     .unwrap()
///     .with_interpolation(Interpolation::Tetrahedral);
/// let out = lut.apply([0.5, 0.25, 0.75]);
/// assert!((out[1] - 0.25).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    data: Vec<f32>,
    size: usize,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
    interpolation: Interpolation,
}

impl Lut3D {
    /// Creates a LUT from `size^3` interleaved RGB triples in blue-fastest
    /// order.
    ///
    /// Fails with [`LutError::InvalidSize`] if `size < 2` or
    /// `data.len() != size^3 * 3`.
    pub fn new(data: Vec<f32>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "3D LUT grid size must be at least 2, got {}",
                size
            )));
        }
        let expected = size
            .checked_pow(3)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| LutError::InvalidSize(format!("grid size {} overflows", size)))?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} values for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            interpolation: Interpolation::Linear,
        })
    }

    /// Creates a LUT from RGB nodes in blue-fastest order.
    pub fn from_rgb(nodes: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        Self::new(nodes.into_iter().flatten().collect(), size)
    }

    /// Identity cube: node `(r, g, b)` holds `(r, g, b) / (size - 1)`.
    pub fn identity(size: usize) -> LutResult<Self> {
        Self::from_fn(size, |rgb| rgb)
    }

    /// Samples `f` at every grid node.
    ///
    /// ```rust
    /// use vfx_lut::Lut3D;
    ///
    /// let invert = Lut3D::from_fn(9, |[r, g, b]| [1.0 - r, 1.0 - g, 1.0 - b]).unwrap();
    /// assert_eq!(invert.node(0, 0, 8), [1.0, 1.0, 0.0]);
    /// ```
    pub fn from_fn<F>(size: usize, mut f: F) -> LutResult<Self>
    where
        F: FnMut([f32; 3]) -> [f32; 3],
    {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "3D LUT grid size must be at least 2, got {}",
                size
            )));
        }
        let len = size
            .checked_pow(3)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| LutError::InvalidSize(format!("grid size {} overflows", size)))?;
        let last = (size - 1) as f32;
        let mut data = Vec::with_capacity(len);
        for r in 0..size {
            for g in 0..size {
                for b in 0..size {
                    data.extend(f([r as f32 / last, g as f32 / last, b as f32 / last]));
                }
            }
        }
        Self::new(data, size)
    }

    /// Sets the per-axis input domain. Each `max` must exceed its `min`.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> LutResult<Self> {
        for c in 0..3 {
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

    /// Sets the interpolation used by [`apply`](Self::apply).
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Grid size along each axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Interleaved node data, blue-fastest.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Interpolation used by [`apply`](Self::apply).
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Input domain minimum.
    pub fn domain_min(&self) -> [f32; 3] {
        self.domain_min
    }

    /// Input domain maximum.
    pub fn domain_max(&self) -> [f32; 3] {
        self.domain_max
    }

    /// Number of grid nodes (`size^3`).
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Value stored at grid node `(r, g, b)`.
    #[inline]
    pub fn node(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        let i = 3 * (b + self.size * (g + self.size * r));
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Applies the LUT with its configured interpolation.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.apply_with(rgb, self.interpolation)
    }

    /// Applies the LUT with an explicit interpolation.
    pub fn apply_with(&self, rgb: [f32; 3], interpolation: Interpolation) -> [f32; 3] {
        match interpolation {
            Interpolation::Nearest => self.nearest(rgb),
            Interpolation::Linear => self.trilinear(rgb),
            Interpolation::Tetrahedral => self.tetrahedral(rgb),
        }
    }

    fn normalize(&self, rgb: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for c in 0..3 {
            out[c] = ((rgb[c] - self.domain_min[c]) / (self.domain_max[c] - self.domain_min[c]))
                .clamp(0.0, 1.0);
        }
        out
    }

    /// Lower cell index and fraction along one axis.
    #[inline]
    fn cell(&self, v: f32) -> (usize, f32) {
        let scaled = v * (self.size - 1) as f32;
        let i = (scaled.floor() as usize).min(self.size - 2);
        (i, scaled - i as f32)
    }

    fn nearest(&self, rgb: [f32; 3]) -> [f32; 3] {
        let v = self.normalize(rgb);
        let n = (self.size - 1) as f32;
        let idx = v.map(|x| ((x * n).round() as usize).min(self.size - 1));
        self.node(idx[0], idx[1], idx[2])
    }

    fn trilinear(&self, rgb: [f32; 3]) -> [f32; 3] {
        let v = self.normalize(rgb);
        let (ri, rf) = self.cell(v[0]);
        let (gi, gf) = self.cell(v[1]);
        let (bi, bf) = self.cell(v[2]);

        let c000 = self.node(ri, gi, bi);
        let c001 = self.node(ri, gi, bi + 1);
        let c010 = self.node(ri, gi + 1, bi);
        let c011 = self.node(ri, gi + 1, bi + 1);
        let c100 = self.node(ri + 1, gi, bi);
        let c101 = self.node(ri + 1, gi, bi + 1);
        let c110 = self.node(ri + 1, gi + 1, bi);
        let c111 = self.node(ri + 1, gi + 1, bi + 1);

        let mut out = [0.0f32; 3];
        for i in 0..3 {
            // blue
            let c00 = lerp(c000[i], c001[i], bf);
            let c01 = lerp(c010[i], c011[i], bf);
            let c10 = lerp(c100[i], c101[i], bf);
            let c11 = lerp(c110[i], c111[i], bf);
            // green
            let c0 = lerp(c00, c01, gf);
            let c1 = lerp(c10, c11, gf);
            // red
            out[i] = lerp(c0, c1, rf);
        }
        out
    }

    fn tetrahedral(&self, rgb: [f32; 3]) -> [f32; 3] {
        let v = self.normalize(rgb);
        let (ri, rf) = self.cell(v[0]);
        let (gi, gf) = self.cell(v[1]);
        let (bi, bf) = self.cell(v[2]);

        let c000 = self.node(ri, gi, bi);
        let c111 = self.node(ri + 1, gi + 1, bi + 1);

        // Strict comparisons: ties fall to the later branches.
        let mut out = [0.0f32; 3];
        if rf > gf {
            if gf > bf {
                let c100 = self.node(ri + 1, gi, bi);
                let c110 = self.node(ri + 1, gi + 1, bi);
                for i in 0..3 {
                    out[i] = c000[i]
                        + rf * (c100[i] - c000[i])
                        + gf * (c110[i] - c100[i])
                        + bf * (c111[i] - c110[i]);
                }
            } else if rf > bf {
                let c100 = self.node(ri + 1, gi, bi);
                let c101 = self.node(ri + 1, gi, bi + 1);
                for i in 0..3 {
                    out[i] = c000[i]
                        + rf * (c100[i] - c000[i])
                        + bf * (c101[i] - c100[i])
                        + gf * (c111[i] - c101[i]);
                }
            } else {
                let c001 = self.node(ri, gi, bi + 1);
                let c101 = self.node(ri + 1, gi, bi + 1);
                for i in 0..3 {
                    out[i] = c000[i]
                        + bf * (c001[i] - c000[i])
                        + rf * (c101[i] - c001[i])
                        + gf * (c111[i] - c101[i]);
                }
            }
        } else if bf > gf {
            let c001 = self.node(ri, gi, bi + 1);
            let c011 = self.node(ri, gi + 1, bi + 1);
            for i in 0..3 {
                out[i] = c000[i]
                    + bf * (c001[i] - c000[i])
                    + gf * (c011[i] - c001[i])
                    + rf * (c111[i] - c011[i]);
            }
        } else if bf > rf {
            let c010 = self.node(ri, gi + 1, bi);
            let c011 = self.node(ri, gi + 1, bi + 1);
            for i in 0..3 {
                out[i] = c000[i]
                    + gf * (c010[i] - c000[i])
                    + bf * (c011[i] - c010[i])
                    + rf * (c111[i] - c011[i]);
            }
        } else {
            let c010 = self.node(ri, gi + 1, bi);
            let c110 = self.node(ri + 1, gi + 1, bi);
            for i in 0..3 {
                out[i] = c000[i]
                    + gf * (c010[i] - c000[i])
                    + rf * (c110[i] - c010[i])
                    + bf * (c111[i] - c110[i]);
            }
        }
        out
    }
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
