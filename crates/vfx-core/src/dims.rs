//! Shape of an interleaved f32 pixel buffer.

use crate::{Error, Result};

/// Width, height and channel count of an interleaved buffer.
///
/// Only RGB (3) and RGBA (4) layouts are accepted. In RGBA buffers the
/// fourth channel is alpha and is passed through by every transform.
///
/// # Example
///
/// ```rust
/// use vfx_core::ImageDims;
///
/// let dims = ImageDims::new(1920, 1080, 4).unwrap();
/// assert_eq!(dims.row_len(), 1920 * 4);
/// assert!(dims.has_alpha());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    width: usize,
    height: usize,
    channels: usize,
    len: usize,
}

impl ImageDims {
    /// Validates and creates a buffer shape.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(
                "width and height must be > 0".into(),
            ));
        }
        if channels != 3 && channels != 4 {
            return Err(Error::InvalidDimensions(format!(
                "expected 3 or 4 channels, got {}",
                channels
            )));
        }

        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(|| Error::InvalidDimensions("image dimensions overflow".into()))?;

        Ok(Self {
            width,
            height,
            channels,
            len,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channels per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True when the fourth channel carries alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of f32 values in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Total number of f32 values in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a validated shape holds at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks that a buffer has exactly the values this shape implies.
    pub fn check(&self, buffer_len: usize) -> Result<()> {
        if buffer_len != self.len {
            return Err(Error::BufferSizeMismatch {
                expected: self.len,
                actual: buffer_len,
            });
        }
        Ok(())
    }
}
