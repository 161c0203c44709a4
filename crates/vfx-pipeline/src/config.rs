//! YAML pipeline descriptions.
//!
//! ```yaml
//! name: show_look
//! ops:
//!   - type: curve
//!     curve: arri_logc3
//!     direction: decode
//!   - type: matrix
//!     path: camera_to_working.spimtx
//!   - type: cdl
//!     slope: [1.1, 1.0, 0.9]
//!     saturation: 1.1
//!   - type: lut3d
//!     path: grade.cube
//!     interpolation: tetrahedral
//!   - type: clamp
//! ```
//!
//! Op fields:
//!
//! | type | fields |
//! |------|--------|
//! | `curve` | `curve`, `direction` (encode) |
//! | `matrix` | `path` (.spimtx) or `matrix` (9 values) + `offset` (3), `direction` |
//! | `cdl` | `slope`, `offset`, `power`, `saturation`, `style`, `direction`, or `path` (.cc/.ccc) + `id` |
//! | `lut1d` | `path` (.cube) |
//! | `lut3d` | `path` (.cube), `interpolation` |
//! | `clamp` | `min` (0), `max` (1) |
//!
//! Relative paths resolve against the directory holding the YAML file. CDL
//! values given next to `path` override the loaded ones.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use vfx_cdl::{CdlDirection, CdlParams, CdlStyle};
use vfx_lut::{Interpolation, Matrix};
use vfx_transfer::{Curve, CurveSpec, Direction};

use crate::{Pipeline, PipelineError, PipelineResult, TransformOp};

impl Pipeline {
    /// Loads a pipeline from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), "loading pipeline");
        let content = std::fs::read_to_string(path)?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_yaml_str(&content, working_dir)
    }

    /// Builds a pipeline from YAML text. File references resolve against
    /// `working_dir`.
    pub fn from_yaml_str(yaml: &str, working_dir: impl AsRef<Path>) -> PipelineResult<Self> {
        let raw: RawPipeline = serde_yaml::from_str(yaml)?;
        let working_dir = working_dir.as_ref();

        let mut pipeline = Pipeline::new();
        if let Some(name) = raw.name {
            pipeline = pipeline.with_name(name);
        }
        for (i, op) in raw.ops.into_iter().enumerate() {
            let op = build_op(op, working_dir)
                .map_err(|e| match e {
                    PipelineError::InvalidOp(msg) => {
                        PipelineError::InvalidOp(format!("op {}: {}", i, msg))
                    }
                    other => other,
                })?;
            debug!(index = i, op = %op, "built op");
            pipeline = pipeline.push(op);
        }
        Ok(pipeline)
    }
}

fn build_op(raw: RawOp, dir: &Path) -> PipelineResult<TransformOp> {
    match raw {
        RawOp::Curve { curve, direction } => {
            let curve: Curve = curve
                .parse()
                .map_err(|e: vfx_transfer::UnknownCurve| PipelineError::InvalidOp(e.to_string()))?;
            let direction = match direction {
                Some(d) => d
                    .parse::<Direction>()
                    .map_err(|e| PipelineError::InvalidOp(e.to_string()))?,
                None => Direction::Encode,
            };
            Ok(TransformOp::Curve(CurveSpec::new(curve, direction)))
        }

        RawOp::Matrix {
            path,
            matrix,
            offset,
            direction,
        } => {
            let m = match (path, matrix) {
                (Some(path), None) => vfx_lut::read_spimtx(dir.join(path))?,
                (None, Some(values)) => {
                    let offset = offset.map(|o| triple(&o, "offset")).transpose()?;
                    Matrix::from_slice(&values, offset)?
                }
                (Some(_), Some(_)) => {
                    return Err(PipelineError::InvalidOp(
                        "matrix takes either `path` or `matrix`, not both".into(),
                    ));
                }
                (None, None) => {
                    return Err(PipelineError::InvalidOp(
                        "matrix needs `path` or `matrix`".into(),
                    ));
                }
            };
            let m = if is_inverse(direction.as_deref())? {
                m.inverse()
                    .ok_or_else(|| PipelineError::InvalidOp("matrix is not invertible".into()))?
            } else {
                m
            };
            Ok(TransformOp::Matrix(m))
        }

        RawOp::Cdl {
            path,
            id,
            slope,
            offset,
            power,
            saturation,
            style,
            direction,
        } => {
            let mut params = match path {
                Some(path) => load_cdl(&dir.join(path), id.as_deref())?,
                None => CdlParams::new(),
            };
            if let Some(v) = slope {
                params.slope = triple(&v, "slope")?.map(|x| x as f32);
            }
            if let Some(v) = offset {
                params.offset = triple(&v, "offset")?.map(|x| x as f32);
            }
            if let Some(v) = power {
                params.power = triple(&v, "power")?.map(|x| x as f32);
            }
            if let Some(v) = saturation {
                params.saturation = v;
            }
            let style = match style {
                Some(s) => s.parse::<CdlStyle>()?,
                None => CdlStyle::Asc,
            };
            let direction = if is_inverse(direction.as_deref())? {
                CdlDirection::Reverse
            } else {
                CdlDirection::Forward
            };
            Ok(TransformOp::Cdl {
                params,
                style,
                direction,
            })
        }

        RawOp::Lut1d { path } => Ok(TransformOp::Lut1D(vfx_lut::read_cube_1d(dir.join(path))?)),

        RawOp::Lut3d {
            path,
            interpolation,
        } => {
            let mut lut = vfx_lut::read_cube_3d(dir.join(path))?;
            if let Some(name) = interpolation {
                lut = lut.with_interpolation(name.parse::<Interpolation>()?);
            }
            Ok(TransformOp::Lut3D(lut))
        }

        RawOp::Clamp { min, max } => {
            let (min, max) = (min.unwrap_or(0.0), max.unwrap_or(1.0));
            if min.is_nan() || max.is_nan() || min > max {
                return Err(PipelineError::InvalidOp(format!(
                    "clamp min {} is above max {}",
                    min, max
                )));
            }
            Ok(TransformOp::Clamp { min, max })
        }
    }
}

/// `.cc` holds one correction; anything else is read as a collection and
/// searched by `id`, or its first correction is used.
fn load_cdl(path: &Path, id: Option<&str>) -> PipelineResult<CdlParams> {
    let is_cc = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cc"));
    if is_cc {
        return Ok(vfx_cdl::read_cc(path)?.params);
    }

    let collection = vfx_cdl::read_ccc(path)?;
    let cc = match id {
        Some(id) => collection.find(id).ok_or_else(|| {
            PipelineError::InvalidOp(format!(
                "no correction '{}' in {}",
                id,
                path.display()
            ))
        })?,
        None => collection.first().ok_or_else(|| {
            PipelineError::InvalidOp(format!("no corrections in {}", path.display()))
        })?,
    };
    Ok(cc.params)
}

fn is_inverse(direction: Option<&str>) -> PipelineResult<bool> {
    match direction.map(|d| d.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(d) => match d.as_str() {
            "forward" => Ok(false),
            "inverse" | "reverse" => Ok(true),
            _ => Err(PipelineError::InvalidOp(format!(
                "unknown direction '{}'",
                d
            ))),
        },
    }
}

fn triple(values: &[f64], field: &str) -> PipelineResult<[f64; 3]> {
    values.try_into().map_err(|_| {
        PipelineError::InvalidOp(format!(
            "`{}` needs 3 values, got {}",
            field,
            values.len()
        ))
    })
}

// ============================================================================
// Raw YAML structures for serde
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPipeline {
    name: Option<String>,
    #[serde(default)]
    ops: Vec<RawOp>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawOp {
    Curve {
        curve: String,
        direction: Option<String>,
    },
    Matrix {
        path: Option<PathBuf>,
        matrix: Option<Vec<f64>>,
        offset: Option<Vec<f64>>,
        direction: Option<String>,
    },
    Cdl {
        path: Option<PathBuf>,
        id: Option<String>,
        slope: Option<Vec<f64>>,
        offset: Option<Vec<f64>>,
        power: Option<Vec<f64>>,
        saturation: Option<f32>,
        style: Option<String>,
        direction: Option<String>,
    },
    Lut1d {
        path: PathBuf,
    },
    Lut3d {
        path: PathBuf,
        interpolation: Option<String>,
    },
    Clamp {
        min: Option<f32>,
        max: Option<f32>,
    },
}
