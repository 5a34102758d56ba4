//! Destination bitmaps and scoped write access to their pixels

use crate::error::CopyError;
use crate::frame::check_extent;
use crate::pixel_type::BitmapFormat;
use crate::types::{Dimensions, Region};
use image::{Rgb, RgbImage};
use log::trace;
use std::ops::{Deref, DerefMut};

/// Owned display bitmap
///
/// Rows are `stride` bytes apart; 32-bit pixels are native-endian
/// `0xAARRGGBB` words.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize,
    format: BitmapFormat,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a zeroed bitmap with rows padded to 4 bytes
    #[must_use]
    pub fn new(width: u32, height: u32, format: BitmapFormat) -> Self {
        let stride = (width as usize * format.bytes_per_pixel() + 3) & !3;
        Self {
            width,
            height,
            stride,
            format,
            data: vec![0; stride * height as usize],
        }
    }

    /// Allocate a zeroed bitmap with an explicit row stride
    ///
    /// # Errors
    ///
    /// Returns `CopyError::InvalidDestination` if `stride` is shorter than a
    /// packed row.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        format: BitmapFormat,
    ) -> Result<Self, CopyError> {
        let len = stride * height as usize;
        check_extent(len, stride, width, height, format.bytes_per_pixel())
            .map_err(CopyError::InvalidDestination)?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data: vec![0; len],
        })
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Packed word at (x, y) of a 32-bit bitmap
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if self.format.bytes_per_pixel() != 4 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let word = self.data[offset..offset + 4].try_into().ok()?;
        Some(u32::from_ne_bytes(word))
    }

    /// Set every pixel of a 32-bit bitmap to `word`, leaving row padding alone
    pub fn fill(&mut self, word: u32) {
        if self.format.bytes_per_pixel() != 4 || self.stride == 0 {
            return;
        }
        let packed = self.width as usize * 4;
        for row in self.data.chunks_mut(self.stride) {
            for px in row[..packed].chunks_exact_mut(4) {
                px.copy_from_slice(&word.to_ne_bytes());
            }
        }
    }

    /// Lock `region` for writing
    ///
    /// The lock covers the part of `region` that lies inside the bitmap and
    /// is released when the returned handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns `CopyError::InvalidArgument` for an empty region or one whose
    /// origin lies outside the bitmap, and
    /// `CopyError::UnsupportedDestinationFormat` unless the bitmap is `Rgb32`.
    pub fn lock(&mut self, region: Region) -> Result<BitmapLock<'_>, CopyError> {
        if region.is_degenerate() {
            return Err(CopyError::InvalidArgument(format!("empty region {region}")));
        }
        if region.x >= self.width || region.y >= self.height {
            return Err(CopyError::InvalidArgument(format!(
                "region {region} starts outside {dims} bitmap",
                dims = self.dimensions()
            )));
        }
        if self.format != BitmapFormat::Rgb32 {
            return Err(CopyError::UnsupportedDestinationFormat(self.format));
        }

        let width = region.width.min(self.width - region.x);
        let height = region.height.min(self.height - region.y);
        let offset = region.y as usize * self.stride + region.x as usize * 4;

        let buffer = Rgb32Buffer::new(&mut self.data[offset..], self.stride, width, height)?;
        let locked = Region::new(region.x, region.y, width, height);
        trace!("locked {locked}");

        Ok(BitmapLock {
            buffer,
            region: locked,
        })
    }

    /// Copy into an `RgbImage`, dropping alpha
    #[must_use]
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let offset = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
            match self.format {
                BitmapFormat::Rgb32 | BitmapFormat::Argb32 => {
                    let word = u32::from_ne_bytes([
                        self.data[offset],
                        self.data[offset + 1],
                        self.data[offset + 2],
                        self.data[offset + 3],
                    ]);
                    let [_, r, g, b] = word.to_be_bytes();
                    Rgb([r, g, b])
                }
                BitmapFormat::Rgb24 => Rgb([
                    self.data[offset],
                    self.data[offset + 1],
                    self.data[offset + 2],
                ]),
            }
        })
    }
}

/// Exclusive write access to a locked bitmap region
///
/// Dereferences to the `Rgb32Buffer` the converter writes into.
#[derive(Debug)]
pub struct BitmapLock<'a> {
    buffer: Rgb32Buffer<'a>,
    region: Region,
}

impl BitmapLock<'_> {
    /// Locked rectangle, already clamped to the bitmap
    #[inline]
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }
}

impl<'a> Deref for BitmapLock<'a> {
    type Target = Rgb32Buffer<'a>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for BitmapLock<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for BitmapLock<'_> {
    fn drop(&mut self) {
        trace!("unlocked {}", self.region);
    }
}

/// Borrowed packed 32-bit destination
///
/// Row `y` starts at byte `y * stride`; only the first `width * 4` bytes of
/// each row belong to the image.
#[derive(Debug)]
pub struct Rgb32Buffer<'a> {
    data: &'a mut [u8],
    stride: usize,
    width: u32,
    height: u32,
}

impl<'a> Rgb32Buffer<'a> {
    /// # Errors
    ///
    /// Returns `CopyError::InvalidDestination` if `stride` is shorter than a
    /// packed row or `data` does not reach the end of the last row.
    pub fn new(
        data: &'a mut [u8],
        stride: usize,
        width: u32,
        height: u32,
    ) -> Result<Self, CopyError> {
        check_extent(data.len(), stride, width, height, 4)
            .map_err(CopyError::InvalidDestination)?;

        Ok(Self {
            data,
            stride,
            width,
            height,
        })
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Packed word at (x, y)
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let word = self.data[offset..offset + 4].try_into().ok()?;
        Some(u32::from_ne_bytes(word))
    }

    /// First `width` pixels of row `y`, as raw bytes
    ///
    /// Callers must have clamped `y` and `width` to the buffer extent.
    pub(crate) fn row_mut(&mut self, y: u32, width: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.data[start..start + width as usize * 4]
    }
}
