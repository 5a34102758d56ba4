//! Pixel layout tags for source frames and destination bitmaps

use std::fmt::Display;
use std::str::FromStr;

/// Layout of the samples in a camera frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelType {
    Mono8,
    Mono12,
    Mono12P,
    Mono16,
    Rgb24,
    Rgb48,
    Bgr24,
    Bgr48,
    Unknown(String),
}

impl FromStr for PixelType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "MONO8" => Self::Mono8,
            "MONO12" => Self::Mono12,
            "MONO12P" => Self::Mono12P,
            "MONO16" => Self::Mono16,
            "RGB24" => Self::Rgb24,
            "RGB48" => Self::Rgb48,
            "BGR24" => Self::Bgr24,
            "BGR48" => Self::Bgr48,
            _ => Self::Unknown(s.trim().to_string()),
        })
    }
}

impl PixelType {
    #[inline(always)]
    #[must_use]
    pub fn is_mono16(&self) -> bool {
        matches!(self, Self::Mono16)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_mono(&self) -> bool {
        matches!(self, Self::Mono8 | Self::Mono12 | Self::Mono12P | Self::Mono16)
    }

    /// Bytes per pixel for byte-aligned layouts, `None` for packed or unknown ones
    #[must_use]
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::Mono8 => Some(1),
            Self::Mono12 | Self::Mono16 => Some(2),
            Self::Rgb24 | Self::Bgr24 => Some(3),
            Self::Rgb48 | Self::Bgr48 => Some(6),
            Self::Mono12P | Self::Unknown(_) => None,
        }
    }
}

impl Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mono8 => write!(f, "MONO8"),
            Self::Mono12 => write!(f, "MONO12"),
            Self::Mono12P => write!(f, "MONO12P"),
            Self::Mono16 => write!(f, "MONO16"),
            Self::Rgb24 => write!(f, "RGB24"),
            Self::Rgb48 => write!(f, "RGB48"),
            Self::Bgr24 => write!(f, "BGR24"),
            Self::Bgr48 => write!(f, "BGR48"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Pixel format of a destination bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    /// Packed `0xAARRGGBB` words, alpha not composited
    Rgb32,
    /// Packed `0xAARRGGBB` words with meaningful alpha
    Argb32,
    /// Three bytes per pixel, no padding between pixels
    Rgb24,
}

impl BitmapFormat {
    #[inline]
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb32 | Self::Argb32 => 4,
            Self::Rgb24 => 3,
        }
    }
}

impl Display for BitmapFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb32 => write!(f, "RGB32"),
            Self::Argb32 => write!(f, "ARGB32"),
            Self::Rgb24 => write!(f, "RGB24"),
        }
    }
}
