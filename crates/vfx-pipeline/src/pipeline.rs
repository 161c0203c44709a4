//! The op chain and its buffer dispatch.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, trace};
use vfx_cdl::CdlParams;
use vfx_core::{ImageDims, Rgb};
use vfx_lut::{Lut1D, Lut3D, Matrix};
use vfx_transfer::CurveSpec;

use crate::{PipelineError, PipelineResult, TransformOp};

/// An ordered chain of [`TransformOp`]s.
///
/// Ops run left to right on every pixel. Interleaved buffers are split into
/// rows and processed on rayon's global pool; alpha is never touched.
///
/// # Example
///
/// ```rust
/// use vfx_core::ImageDims;
/// use vfx_pipeline::Pipeline;
/// use vfx_transfer::{Curve, CurveSpec};
///
/// let pipeline = Pipeline::new()
///     .curve(CurveSpec::decode(Curve::Srgb))
///     .clamp(0.0, 1.0)
///     .curve(CurveSpec::encode(Curve::Srgb));
///
/// let dims = ImageDims::new(2, 1, 4).unwrap();
/// let mut pixels = vec![0.5, 0.25, 0.0, 0.7, 1.0, 0.5, 0.25, 1.0];
/// pipeline.apply_buffer(&mut pixels, dims).unwrap();
/// assert_eq!(pixels[3], 0.7);
/// assert!((pixels[0] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    name: Option<String>,
    ops: Vec<TransformOp>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends an op.
    pub fn push(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Appends a forward ASC CDL.
    pub fn cdl(self, params: CdlParams) -> Self {
        self.push(TransformOp::cdl(params))
    }

    /// Appends a 1D LUT.
    pub fn lut1d(self, lut: Lut1D) -> Self {
        self.push(TransformOp::Lut1D(lut))
    }

    /// Appends a 3D LUT.
    pub fn lut3d(self, lut: Lut3D) -> Self {
        self.push(TransformOp::Lut3D(lut))
    }

    /// Appends a transfer curve.
    pub fn curve(self, spec: CurveSpec) -> Self {
        self.push(TransformOp::Curve(spec))
    }

    /// Appends a matrix.
    pub fn matrix(self, matrix: Matrix) -> Self {
        self.push(TransformOp::Matrix(matrix))
    }

    /// Appends a clamp.
    pub fn clamp(self, min: f32, max: f32) -> Self {
        self.push(TransformOp::Clamp { min, max })
    }

    /// Display name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The ops, in application order.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Number of ops.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the pipeline has no ops.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Runs every op on one pixel.
    #[inline]
    pub fn apply_rgb(&self, rgb: Rgb) -> Rgb {
        self.ops.iter().fold(rgb, |px, op| op.apply(px))
    }

    /// Runs the pipeline over a slice of RGB triples in parallel.
    pub fn apply_pixels(&self, pixels: &mut [Rgb]) {
        if self.ops.is_empty() {
            return;
        }
        pixels.par_iter_mut().for_each(|px| *px = self.apply_rgb(*px));
    }

    /// Runs the pipeline over an interleaved RGB or RGBA buffer in place.
    ///
    /// Fails if `buffer` does not hold exactly `dims.len()` values.
    pub fn apply_buffer(&self, buffer: &mut [f32], dims: ImageDims) -> PipelineResult<()> {
        let cancel = AtomicBool::new(false);
        self.apply_buffer_with_cancel(buffer, dims, &cancel)
    }

    /// Like [`apply_buffer`](Self::apply_buffer), checking `cancel` before
    /// each row.
    ///
    /// Returns [`PipelineError::Cancelled`] if the flag was seen set. Rows
    /// already finished keep their new values; the rest are untouched.
    pub fn apply_buffer_with_cancel(
        &self,
        buffer: &mut [f32],
        dims: ImageDims,
        cancel: &AtomicBool,
    ) -> PipelineResult<()> {
        dims.check(buffer.len())?;
        debug!(
            ops = self.ops.len(),
            width = dims.width(),
            height = dims.height(),
            channels = dims.channels(),
            "applying pipeline"
        );
        if self.ops.is_empty() {
            return Ok(());
        }

        let channels = dims.channels();
        buffer
            .par_chunks_mut(dims.row_len())
            .enumerate()
            .try_for_each(|(y, row)| {
                if cancel.load(Ordering::Relaxed) {
                    trace!(row = y, "cancel seen");
                    return Err(PipelineError::Cancelled);
                }
                for px in row.chunks_exact_mut(channels) {
                    let out = self.apply_rgb([px[0], px[1], px[2]]);
                    px[..3].copy_from_slice(&out);
                }
                Ok(())
            })
    }
}

impl FromIterator<TransformOp> for Pipeline {
    fn from_iter<I: IntoIterator<Item = TransformOp>>(iter: I) -> Self {
        Self {
            name: None,
            ops: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use vfx_transfer::Curve;

    fn ramp(dims: ImageDims) -> Vec<f32> {
        (0..dims.len())
            .map(|i| (i % 17) as f32 / 16.0)
            .collect()
    }

    fn grade() -> Pipeline {
        Pipeline::new()
            .curve(CurveSpec::decode(Curve::ArriLogC3))
            .matrix(Matrix::scale([1.1, 1.0, 0.9]))
            .cdl(CdlParams::new().with_power([1.2; 3]).with_saturation(0.9))
            .curve(CurveSpec::encode(Curve::Srgb))
    }

    #[test]
    fn ops_run_in_order() {
        let lift_then_gain = Pipeline::new()
            .matrix(Matrix::new(Matrix::identity().matrix, [0.1; 3]))
            .matrix(Matrix::scale([2.0; 3]));
        assert_abs_diff_eq!(lift_then_gain.apply_rgb([0.25; 3])[0], 0.7, epsilon = 1e-6);

        let gain_then_lift: Pipeline = lift_then_gain.ops().iter().rev().cloned().collect();
        assert_abs_diff_eq!(gain_then_lift.apply_rgb([0.25; 3])[0], 0.6, epsilon = 1e-6);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let dims = ImageDims::new(3, 2, 3).unwrap();
        let mut buf = ramp(dims);
        let before = buf.clone();
        Pipeline::new().apply_buffer(&mut buf, dims).unwrap();
        assert_eq!(buf, before);
        assert!(Pipeline::new().is_empty());
    }

    #[test]
    fn buffer_matches_per_pixel() {
        let dims = ImageDims::new(7, 5, 3).unwrap();
        let pipeline = grade();
        let mut buf = ramp(dims);
        let src = buf.clone();
        pipeline.apply_buffer(&mut buf, dims).unwrap();

        for (out, inp) in buf.chunks_exact(3).zip(src.chunks_exact(3)) {
            let expect = pipeline.apply_rgb([inp[0], inp[1], inp[2]]);
            assert_eq!(out, &expect[..]);
        }
    }

    #[test]
    fn alpha_passes_through() {
        let dims = ImageDims::new(4, 3, 4).unwrap();
        let mut buf = ramp(dims);
        for (i, px) in buf.chunks_exact_mut(4).enumerate() {
            px[3] = i as f32 * 0.1 - 0.3;
        }
        let src = buf.clone();
        grade().clamp(0.0, 0.5).apply_buffer(&mut buf, dims).unwrap();

        for (out, inp) in buf.chunks_exact(4).zip(src.chunks_exact(4)) {
            assert_eq!(out[3].to_bits(), inp[3].to_bits());
            assert!(out[..3].iter().all(|v| *v <= 0.5));
        }
    }

    #[test]
    fn rejects_wrong_length() {
        let dims = ImageDims::new(4, 4, 3).unwrap();
        let mut buf = vec![0.0; 47];
        let err = grade().apply_buffer(&mut buf, dims).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Core(vfx_core::Error::BufferSizeMismatch { expected: 48, actual: 47 })
        ));
    }

    #[test]
    fn cancelled_before_start() {
        let dims = ImageDims::new(8, 8, 3).unwrap();
        let mut buf = ramp(dims);
        let src = buf.clone();
        let cancel = AtomicBool::new(true);

        let err = grade()
            .apply_buffer_with_cancel(&mut buf, dims, &cancel)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled));
        assert_eq!(buf, src);
    }

    #[test]
    fn pixels_match_rgb() {
        let pipeline = grade();
        let mut pixels: Vec<Rgb> = (0..64).map(|i| [i as f32 / 63.0, 0.4, 0.2]).collect();
        let expect: Vec<Rgb> = pixels.iter().map(|p| pipeline.apply_rgb(*p)).collect();
        pipeline.apply_pixels(&mut pixels);
        assert_eq!(pixels, expect);
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }
}
