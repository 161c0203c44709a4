//! 3x3 color matrix with offset, and the `.spimtx` file format.
//!
//! A `.spimtx` file holds 12 whitespace-separated numbers, one row per
//! output channel:
//!
//! ```text
//! m00 m01 m02 offset_r
//! m10 m11 m12 offset_g
//! m20 m21 m22 offset_b
//! ```
//!
//! Offsets are stored in 16-bit code values and divided by 65535 on load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::{LutError, LutResult};

/// Scale of `.spimtx` offsets.
pub const SPIMTX_OFFSET_SCALE: f64 = 65535.0;

const SINGULAR_EPSILON: f64 = 1e-12;

/// A 3x3 matrix plus offset: `out = matrix * in + offset`.
///
/// Stored and evaluated in f64; input and output pixels are f32.
///
/// # Example
///
/// ```rust
/// use vfx_lut::Matrix;
///
/// let gain = Matrix::scale([2.0, 1.0, 0.5]);
/// assert_eq!(gain.apply([0.25, 0.5, 1.0]), [0.5, 0.5, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Row-major coefficients, `matrix[row][col]`.
    pub matrix: [[f64; 3]; 3],
    /// Offset added after the multiply, in normalized units.
    pub offset: [f64; 3],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Identity, zero offset.
    pub const fn identity() -> Self {
        Self::scale([1.0, 1.0, 1.0])
    }

    /// Diagonal matrix.
    pub const fn scale(s: [f64; 3]) -> Self {
        Self {
            matrix: [[s[0], 0.0, 0.0], [0.0, s[1], 0.0], [0.0, 0.0, s[2]]],
            offset: [0.0; 3],
        }
    }

    /// Matrix and offset as given.
    pub const fn new(matrix: [[f64; 3]; 3], offset: [f64; 3]) -> Self {
        Self { matrix, offset }
    }

    /// Builds from 9 row-major coefficients and an optional offset.
    ///
    /// Fails unless `values` has exactly 9 entries.
    pub fn from_slice(values: &[f64], offset: Option<[f64; 3]>) -> LutResult<Self> {
        if values.len() != 9 {
            return Err(LutError::ParseError(format!(
                "matrix needs 9 values, got {}",
                values.len()
            )));
        }
        let mut matrix = [[0.0; 3]; 3];
        for (i, v) in values.iter().enumerate() {
            matrix[i / 3][i % 3] = *v;
        }
        Ok(Self::new(matrix, offset.unwrap_or([0.0; 3])))
    }

    /// Builds from the 12 values of a `.spimtx` file, scaling offsets.
    pub fn from_spimtx_values(values: [f64; 12]) -> Self {
        let mut out = Self::identity();
        for row in 0..3 {
            out.matrix[row].copy_from_slice(&values[row * 4..row * 4 + 3]);
            out.offset[row] = values[row * 4 + 3] / SPIMTX_OFFSET_SCALE;
        }
        out
    }

    /// The 12 values written to a `.spimtx` file.
    pub fn to_spimtx_values(&self) -> [f64; 12] {
        let mut values = [0.0; 12];
        for row in 0..3 {
            values[row * 4..row * 4 + 3].copy_from_slice(&self.matrix[row]);
            values[row * 4 + 3] = self.offset[row] * SPIMTX_OFFSET_SCALE;
        }
        values
    }

    /// `matrix * rgb + offset`, evaluated in f64.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.apply_f64(rgb.map(f64::from)).map(|v| v as f32)
    }

    /// `matrix * rgb + offset` in f64.
    #[inline]
    pub fn apply_f64(&self, rgb: [f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        let mut out = self.offset;
        for (row, o) in out.iter_mut().enumerate() {
            *o += m[row][0] * rgb[0] + m[row][1] * rgb[1] + m[row][2] * rgb[2];
        }
        out
    }

    /// Determinant of the 3x3 part.
    pub fn determinant(&self) -> f64 {
        let m = &self.matrix;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return None;
        }

        // adjugate / det; cofactor (r, c) uses the rows and cols other than r, c
        let m = &self.matrix;
        let mut inv = [[0.0; 3]; 3];
        for r in 0..3 {
            for c in 0..3 {
                let (r1, r2) = ((c + 1) % 3, (c + 2) % 3);
                let (c1, c2) = ((r + 1) % 3, (r + 2) % 3);
                inv[r][c] = (m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1]) / det;
            }
        }

        let linear = Self::new(inv, [0.0; 3]);
        let moved = linear.apply_f64(self.offset);
        Some(Self::new(inv, moved.map(|v| -v)))
    }

    /// Matrix that applies `first`, then `self`.
    pub fn compose(&self, first: &Matrix) -> Self {
        let (a, b) = (&self.matrix, &first.matrix);
        let mut matrix = [[0.0; 3]; 3];
        for (r, row) in matrix.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
        }
        let offset = self.apply_f64(first.offset);
        Self { matrix, offset }
    }
}

/// Reads a `.spimtx` file.
pub fn read_spimtx<P: AsRef<Path>>(path: P) -> LutResult<Matrix> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading spimtx");
    parse_spimtx(BufReader::new(File::open(path)?))
}

/// Parses `.spimtx` text. `#` lines are comments; every other token must be
/// a number and there must be exactly 12.
pub fn parse_spimtx<R: Read>(mut reader: R) -> LutResult<Matrix> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut values = Vec::with_capacity(12);
    for token in content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
    {
        let v: f64 = token.parse().map_err(|_| {
            LutError::ParseError(format!("invalid number in spimtx: '{}'", token))
        })?;
        values.push(v);
    }

    let values: [f64; 12] = values.try_into().map_err(|v: Vec<f64>| {
        LutError::ParseError(format!("spimtx needs 12 values, found {}", v.len()))
    })?;
    Ok(Matrix::from_spimtx_values(values))
}

/// Writes a `.spimtx` file.
pub fn write_spimtx<P: AsRef<Path>>(path: P, matrix: &Matrix) -> LutResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_spimtx_to(&mut writer, matrix)?;
    writer.flush()?;
    Ok(())
}

/// Writes `.spimtx` text to any writer, three rows of four.
pub fn write_spimtx_to<W: Write>(writer: &mut W, matrix: &Matrix) -> LutResult<()> {
    let values = matrix.to_spimtx_values();
    for row in values.chunks_exact(4) {
        writeln!(writer, "{} {} {} {}", row[0], row[1], row[2], row[3])?;
    }
    Ok(())
}
