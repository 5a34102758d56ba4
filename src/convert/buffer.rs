//! Row-wise mono16 to packed RGB32 conversion

use super::transform::{Transform, linear, pack_gray, shift, threshold};
use crate::bitmap::Rgb32Buffer;
use crate::error::CopyError;
use crate::frame::{SourceFrame, read_sample};
use crate::types::{Dimensions, Window};
use log::{debug, warn};

/// Convert a mono16 frame into a packed 32-bit RGB buffer
///
/// `size` is clamped to both the destination and the source extent; only
/// pixels inside the clamped rectangle are read or written. Returns the
/// clamped extent.
///
/// # Errors
///
/// Returns `CopyError::UnsupportedSourcePixelType` if `src` is not mono16.
/// The destination is not modified in that case.
pub fn convert_mono16_to_rgb32(
    dst: &mut Rgb32Buffer<'_>,
    src: &SourceFrame<'_>,
    size: Dimensions,
    window: Window,
) -> Result<Dimensions, CopyError> {
    if !src.pixel_type().is_mono16() {
        return Err(CopyError::UnsupportedSourcePixelType(src.pixel_type().clone()));
    }

    let clamped = size.min(dst.dimensions()).min(src.dimensions());
    if clamped != size {
        warn!("region {size} clamped to {clamped}");
    }

    let transform = Transform::from_window(window);
    debug!("converting {clamped} mono16 -> rgb32, {window}, {transform}");

    for y in 0..clamped.height {
        let src_row = src.mono16_row(y, clamped.width);
        let dst_row = dst.row_mut(y, clamped.width);
        convert_row(dst_row, src_row, transform);
    }

    Ok(clamped)
}

/// Convert one row; the mode is matched once per row, not per sample
fn convert_row(dst: &mut [u8], src: &[u8], transform: Transform) {
    let pixels = dst.chunks_exact_mut(4).zip(src.chunks_exact(2));

    match transform {
        Transform::Linear { gain, base } => {
            for (out, sample) in pixels {
                let c = linear(read_sample([sample[0], sample[1]]), gain, base);
                out.copy_from_slice(&pack_gray(c).to_ne_bytes());
            }
        }
        Transform::Threshold { level } => {
            for (out, sample) in pixels {
                let c = threshold(read_sample([sample[0], sample[1]]), level);
                out.copy_from_slice(&pack_gray(c).to_ne_bytes());
            }
        }
        Transform::Shift => {
            for (out, sample) in pixels {
                let c = shift(read_sample([sample[0], sample[1]]));
                out.copy_from_slice(&pack_gray(c).to_ne_bytes());
            }
        }
    }
}
