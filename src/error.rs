//! Failure taxonomy for frame-to-bitmap copies
//!
//! Destination and argument checks belong to the caller that owns the
//! bitmap; the source pixel type is checked by the converter itself.
//! Every failure leaves the destination untouched.

use crate::pixel_type::{BitmapFormat, PixelType};
use thiserror::Error;

/// Error returned by a frame-to-bitmap copy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// Degenerate region or region outside the bitmap
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Destination memory does not cover its declared extent
    #[error("invalid destination buffer: {0}")]
    InvalidDestination(String),

    /// Destination is not a packed 32-bit RGB bitmap
    #[error("unsupported destination pixel format: {0}")]
    UnsupportedDestinationFormat(BitmapFormat),

    /// Source memory does not cover its declared extent
    #[error("invalid source buffer: {0}")]
    InvalidSource(String),

    /// Source frame is not 16-bit monochrome
    #[error("unsupported source pixel type: {0}")]
    UnsupportedSourcePixelType(PixelType),
}

impl CopyError {
    /// Legacy acquisition-SDK status word, for log correlation only
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidArgument(_) => 0x8000_0001,
            Self::InvalidDestination(_) => 0x8000_0011,
            Self::UnsupportedDestinationFormat(_) => 0x8000_0012,
            Self::InvalidSource(_) => 0x8000_0021,
            Self::UnsupportedSourcePixelType(_) => 0x8000_0022,
        }
    }
}
