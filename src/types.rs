//! Geometry and windowing value types shared by the converter and the CLI

use std::fmt;
use std::str::FromStr;

/// Image dimensions in pixels (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise minimum of two extents
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width = w
            .trim()
            .parse()
            .map_err(|e| format!("invalid width {w:?}: {e}"))?;
        let height = h
            .trim()
            .parse()
            .map_err(|e| format!("invalid height {h:?}: {e}"))?;
        Ok(Self { width, height })
    }
}

/// Rectangle inside a destination bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region anchored at the origin
    #[must_use]
    pub fn from_size(size: Dimensions) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.size().is_empty()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{width}x{height}+{x}+{y}",
            width = self.width,
            height = self.height,
            x = self.x,
            y = self.y
        )
    }
}

/// Display window mapping a 16-bit intensity range onto 0..=255
///
/// The relationship between the two bounds picks the transform:
/// equal bounds give a hard threshold (or a plain `>> 8` when both are
/// zero or negative), `lutmin < lutmax` a linear stretch, and
/// `lutmin > lutmax` an inverted stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub lutmax: i32,
    pub lutmin: i32,
}

impl Window {
    #[must_use]
    pub fn new(lutmax: i32, lutmin: i32) -> Self {
        Self { lutmax, lutmin }
    }

    /// No windowing: the top byte of each sample is displayed
    #[must_use]
    pub fn identity() -> Self {
        Self::new(0, 0)
    }

    /// Black below `level`, white at or above it
    #[must_use]
    pub fn threshold(level: i32) -> Self {
        Self::new(level, level)
    }

    /// Linear stretch of `[min, max]` onto the display range
    #[must_use]
    pub fn from_range(min: u16, max: u16) -> Self {
        Self::new(i32::from(max), i32::from(min))
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lutmin={lutmin} lutmax={lutmax}",
            lutmin = self.lutmin,
            lutmax = self.lutmax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_str() {
        assert_eq!("640x480".parse::<Dimensions>(), Ok(Dimensions::new(640, 480)));
        assert_eq!(" 2X3 ".parse::<Dimensions>(), Ok(Dimensions::new(2, 3)));
        assert!("640".parse::<Dimensions>().is_err());
        assert!("ax3".parse::<Dimensions>().is_err());
        assert!("-1x3".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_dimensions_min() {
        let a = Dimensions::new(10, 2);
        let b = Dimensions::new(4, 8);
        assert_eq!(a.min(b), Dimensions::new(4, 2));
        assert!(Dimensions::new(0, 5).is_empty());
        assert_eq!(Dimensions::new(3, 4).pixel_count(), 12);
    }

    #[test]
    fn test_region_degenerate() {
        assert!(Region::new(1, 1, 0, 4).is_degenerate());
        assert!(Region::new(0, 0, 4, 0).is_degenerate());
        assert!(!Region::from_size(Dimensions::new(1, 1)).is_degenerate());
        assert_eq!(Region::new(2, 3, 4, 5).to_string(), "4x5+2+3");
    }

    #[test]
    fn test_window_constructors() {
        assert_eq!(Window::default(), Window::new(0, 0));
        assert_eq!(Window::threshold(7), Window { lutmax: 7, lutmin: 7 });
        assert_eq!(Window::from_range(100, 200), Window { lutmax: 200, lutmin: 100 });
    }
}
