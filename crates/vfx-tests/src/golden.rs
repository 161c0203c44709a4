//! Golden-hash inputs, hashing and the reference file loader.
//!
//! Reference hashes live in `tests/golden/hashes.json` at the workspace
//! root. The scenarios (inputs, curves, matrices, CDL grades) follow the
//! OCIO parity list; the shipped hashes are regression pins produced by this
//! workspace, and its `source` field says so. A file regenerated from OCIO
//! drops in with the same layout. Tests rebuild the inputs, run our
//! transforms and compare hashes, so no generator is needed at test time.
//!
//! # Hash
//!
//! Each value is widened to f64, multiplied by 10^5, rounded half away from
//! zero and cast to i64. The i64s are fed to SHA-256 as little-endian bytes
//! in row-major order (pixel by pixel, R then G then B).

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Decimal places kept by [`compute_hash`].
pub const HASH_PRECISION: i32 = 5;

/// 256 values from 0 to 1: `i / 255`.
pub fn gray_ramp_256() -> Vec<f32> {
    (0..256).map(|i| i as f32 / 255.0).collect()
}

/// The 8x8x8 RGB unit cube, red outermost and blue innermost, each
/// coordinate `i / 7`.
pub fn rgb_cube_8() -> Vec<[f32; 3]> {
    let size = 8;
    let last = (size - 1) as f32;
    let mut cube = Vec::with_capacity(size * size * size);
    for r in 0..size {
        for g in 0..size {
            for b in 0..size {
                cube.push([r as f32 / last, g as f32 / last, b as f32 / last]);
            }
        }
    }
    cube
}

/// Lowercase hex SHA-256 of the quantized values.
pub fn compute_hash(data: &[f32]) -> String {
    let factor = 10f64.powi(HASH_PRECISION);
    let mut hasher = Sha256::new();
    for v in data {
        let q = (f64::from(*v) * factor).round() as i64;
        hasher.update(q.to_le_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// [`compute_hash`] over RGB triples, flattened.
pub fn compute_hash_rgb(data: &[[f32; 3]]) -> String {
    compute_hash(data.as_flattened())
}

/// Population statistics of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Stats {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    #[serde(default)]
    pub std: f64,
}

impl Stats {
    /// Statistics of `data`, accumulated in f64.
    pub fn of(data: &[f32]) -> Self {
        let n = data.len().max(1) as f64;
        let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
        for v in data.iter().map(|v| f64::from(*v)) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = sum / n;
        let var = data
            .iter()
            .map(|v| (f64::from(*v) - mean).powi(2))
            .sum::<f64>()
            / n;
        Self {
            min,
            max,
            mean,
            std: var.sqrt(),
        }
    }

    /// True when every field is within `tol` of `other`.
    pub fn close_to(&self, other: &Stats, tol: f64) -> bool {
        (self.min - other.min).abs() <= tol
            && (self.max - other.max).abs() <= tol
            && (self.mean - other.mean).abs() <= tol
            && (self.std - other.std).abs() <= tol
    }
}

/// Contents of `hashes.json`.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    /// File format version.
    pub version: String,
    /// Where the hashes came from.
    pub source: Option<String>,
    /// OCIO version, when the hashes were produced by OCIO.
    pub ocio_version: Option<String>,
    /// Hashes of the raw inputs, by input name.
    #[serde(default)]
    pub inputs: HashMap<String, String>,
    /// Reference results by category.
    pub tests: GoldenTests,
}

/// Reference results by category.
#[derive(Debug, Default, Deserialize)]
pub struct GoldenTests {
    /// Transfer curves over `gray_ramp_256`.
    #[serde(default)]
    pub transfers: HashMap<String, GoldenEntry>,
    /// Matrices over `rgb_cube_8`.
    #[serde(default)]
    pub matrices: HashMap<String, GoldenEntry>,
    /// CDL grades over `rgb_cube_8`.
    #[serde(default)]
    pub cdl: HashMap<String, GoldenEntry>,
}

/// One reference result.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenEntry {
    /// Expected hash.
    pub hash: String,
    /// Expected statistics.
    pub stats: Option<Stats>,
    /// `gray_ramp_256` or `rgb_cube_8`.
    pub input_type: Option<String>,
    /// CDL slope.
    pub slope: Option<[f32; 3]>,
    /// CDL offset.
    pub offset: Option<[f32; 3]>,
    /// CDL power.
    pub power: Option<[f32; 3]>,
    /// CDL saturation.
    pub saturation: Option<f32>,
    /// Row-major 3x3 matrix.
    pub matrix: Option<Vec<f64>>,
}

/// Default location of the reference file.
pub fn default_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/golden/hashes.json")
}

/// Reads a reference file.
pub fn load(path: impl AsRef<Path>) -> io::Result<GoldenData> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Reads the workspace reference file.
pub fn load_default() -> io::Result<GoldenData> {
    load(default_path())
}
