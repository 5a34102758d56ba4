//! Read-only view of a camera frame in memory

use crate::error::CopyError;
use crate::pixel_type::PixelType;
use crate::types::Dimensions;

/// Borrowed source frame descriptor
///
/// `rowbytes` is the distance in bytes between the starts of two rows and
/// may exceed the packed row size. Samples are stored in native byte order.
#[derive(Debug, Clone)]
pub struct SourceFrame<'a> {
    buf: &'a [u8],
    rowbytes: usize,
    width: u32,
    height: u32,
    pixel_type: PixelType,
}

impl<'a> SourceFrame<'a> {
    /// Wrap `buf` as a frame
    ///
    /// # Errors
    ///
    /// Returns `CopyError::InvalidSource` if `rowbytes` is shorter than one
    /// packed row or if `buf` does not cover the last row. Layouts without a
    /// whole number of bytes per pixel are not size-checked.
    pub fn new(
        buf: &'a [u8],
        rowbytes: usize,
        width: u32,
        height: u32,
        pixel_type: PixelType,
    ) -> Result<Self, CopyError> {
        if let Some(bpp) = pixel_type.bytes_per_pixel() {
            check_extent(buf.len(), rowbytes, width, height, bpp)
                .map_err(CopyError::InvalidSource)?;
        }

        Ok(Self {
            buf,
            rowbytes,
            width,
            height,
            pixel_type,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn rowbytes(&self) -> usize {
        self.rowbytes
    }

    #[inline]
    #[must_use]
    pub fn pixel_type(&self) -> &PixelType {
        &self.pixel_type
    }

    /// First `width` mono16 samples of row `y`, as raw bytes
    ///
    /// Callers must have clamped `y` and `width` to the frame extent.
    pub(crate) fn mono16_row(&self, y: u32, width: u32) -> &'a [u8] {
        let start = y as usize * self.rowbytes;
        &self.buf[start..start + width as usize * 2]
    }

    /// Unsigned intensity at (x, y) of a mono16 frame
    #[must_use]
    pub fn sample(&self, x: u32, y: u32) -> Option<u16> {
        if !self.pixel_type.is_mono16() || x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.rowbytes + x as usize * 2;
        Some(read_sample([self.buf[offset], self.buf[offset + 1]]))
    }

    /// Smallest and largest intensity of a mono16 frame
    ///
    /// Returns `None` for other layouts and for empty frames.
    #[must_use]
    pub fn min_max(&self) -> Option<(u16, u16)> {
        if !self.pixel_type.is_mono16() || self.dimensions().is_empty() {
            return None;
        }

        let (min, max) = (0..self.height)
            .flat_map(|y| self.mono16_row(y, self.width).chunks_exact(2))
            .map(|chunk| read_sample([chunk[0], chunk[1]]))
            .fold((u16::MAX, u16::MIN), |(min, max), v| (min.min(v), max.max(v)));

        Some((min, max))
    }
}

/// Decode one stored sample into an unsigned intensity
///
/// Frames hand samples over as signed 16-bit words; the bit pattern is
/// reinterpreted, never sign-extended.
#[inline(always)]
#[must_use]
pub fn read_sample(bytes: [u8; 2]) -> u16 {
    let word = i16::from_ne_bytes(bytes);
    u16::from_ne_bytes(word.to_ne_bytes())
}

/// Check that `len` bytes hold `height` rows of `width * bpp` bytes spaced `stride` apart
pub(crate) fn check_extent(
    len: usize,
    stride: usize,
    width: u32,
    height: u32,
    bpp: usize,
) -> Result<(), String> {
    let packed = (width as usize)
        .checked_mul(bpp)
        .ok_or_else(|| format!("row of {width} pixels overflows"))?;

    if stride < packed {
        return Err(format!(
            "row stride {stride} is shorter than {width} pixels of {bpp} bytes"
        ));
    }

    if width == 0 || height == 0 {
        return Ok(());
    }

    let required = stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(packed))
        .ok_or_else(|| format!("{width}x{height} frame with stride {stride} overflows"))?;

    if len < required {
        return Err(format!(
            "expected at least {required} bytes for {width}x{height} with stride {stride}, got {len}"
        ));
    }

    Ok(())
}
