//! Loading camera frames from disk

use crate::error::CopyError;
use crate::frame::SourceFrame;
use crate::pixel_type::PixelType;
use crate::types::Dimensions;
use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

/// Frame bytes owned by the caller, as handed over by an acquisition layer
#[derive(Debug, Clone)]
pub struct FrameData {
    pub buf: Vec<u8>,
    pub rowbytes: usize,
    pub width: u32,
    pub height: u32,
    pub pixel_type: PixelType,
}

impl FrameData {
    /// Borrow as a `SourceFrame`
    ///
    /// # Errors
    ///
    /// Returns `CopyError::InvalidSource` if the bytes do not cover the frame
    pub fn frame(&self) -> Result<SourceFrame<'_>, CopyError> {
        SourceFrame::new(
            &self.buf,
            self.rowbytes,
            self.width,
            self.height,
            self.pixel_type.clone(),
        )
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Load an image file, keeping its sample layout
///
/// 16-bit grayscale images become mono16 frames. Other color types are
/// loaded as-is and tagged with their layout, so the converter can reject
/// them.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<FrameData> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    Ok(from_dynamic_image(image))
}

fn from_dynamic_image(image: DynamicImage) -> FrameData {
    let (width, height) = (image.width(), image.height());

    let (pixel_type, bpp, buf): (PixelType, usize, Vec<u8>) = match image {
        DynamicImage::ImageLuma16(img) => (PixelType::Mono16, 2, words_to_bytes(img.as_raw())),
        DynamicImage::ImageLuma8(img) => (PixelType::Mono8, 1, img.into_raw()),
        DynamicImage::ImageRgb8(img) => (PixelType::Rgb24, 3, img.into_raw()),
        DynamicImage::ImageRgb16(img) => (PixelType::Rgb48, 6, words_to_bytes(img.as_raw())),
        other => {
            let name = format!("{:?}", other.color());
            (PixelType::Unknown(name), 0, other.into_bytes())
        }
    };

    FrameData {
        buf,
        rowbytes: width as usize * bpp,
        width,
        height,
        pixel_type,
    }
}

fn words_to_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_ne_bytes()).collect()
}

/// Load a raw native-endian mono16 dump
///
/// `rowbytes` defaults to the packed row size; larger values skip row
/// padding.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is too short
pub fn load_raw(path: &Path, size: Dimensions, rowbytes: Option<usize>) -> Result<FrameData> {
    let packed = size.width as usize * 2;
    let rowbytes = rowbytes.unwrap_or(packed);
    if rowbytes < packed {
        anyhow::bail!("Row stride {rowbytes} is shorter than {} pixels of 2 bytes", size.width);
    }

    let buf = std::fs::read(path)
        .with_context(|| format!("Failed to read raw frame: {}", path.display()))?;

    let frame = FrameData {
        buf,
        rowbytes,
        width: size.width,
        height: size.height,
        pixel_type: PixelType::Mono16,
    };
    frame
        .frame()
        .with_context(|| format!("Raw frame {} does not hold {size} mono16", path.display()))?;

    Ok(frame)
}
