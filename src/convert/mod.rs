//! Windowed conversion of camera frames into display bitmaps

mod buffer;
mod transform;

pub use buffer::convert_mono16_to_rgb32;
pub use transform::{ALPHA_OPAQUE, Transform, pack_gray};

use crate::bitmap::Bitmap;
use crate::error::CopyError;
use crate::frame::SourceFrame;
use crate::types::{Dimensions, Region, Window};
use log::debug;

/// Copy `src` into `region` of `bitmap` through `window`
///
/// The region is clamped to the bitmap and to the source frame. The bitmap
/// is locked for the duration of the conversion and released on every
/// path. Returns the extent actually converted.
///
/// # Errors
///
/// - `CopyError::InvalidArgument` for an empty region or one starting
///   outside the bitmap
/// - `CopyError::UnsupportedDestinationFormat` unless the bitmap is `Rgb32`
/// - `CopyError::UnsupportedSourcePixelType` unless the frame is mono16
///
/// The bitmap is unchanged whenever an error is returned.
pub fn copy_to_bitmap(
    bitmap: &mut Bitmap,
    src: &SourceFrame<'_>,
    region: Region,
    window: Window,
) -> Result<Dimensions, CopyError> {
    let mut lock = bitmap.lock(region)?;
    let size = lock.region().size();
    let result = convert_mono16_to_rgb32(&mut lock, src, size, window);

    if let Err(e) = &result {
        debug!("copy into {region} failed with {code:#010x}: {e}", code = e.code());
    }

    result
}
