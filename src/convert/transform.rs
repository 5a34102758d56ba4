//! Per-sample intensity transform
//!
//! A `Window` selects one of three transforms once per conversion; the
//! converter then applies it to every sample of the frame.

use crate::types::Window;
use std::fmt;

/// Opaque alpha byte of every display pixel
pub const ALPHA_OPAQUE: u32 = 0xff00_0000;

/// Intensity transform selected from a `Window`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// `gain * (u - base)`, clamped to 0..=255 and truncated
    Linear { gain: f64, base: f64 },
    /// 255 at or above `level`, 0 below
    Threshold { level: i32 },
    /// Top byte of the sample
    Shift,
}

impl Transform {
    /// Select the transform for `window`
    ///
    /// The gain denominator is `lutmax - lutmin + 1` for a normal window and
    /// `lutmax - lutmin - 1` for an inverted one; an inverted window is based
    /// at `lutmax`.
    #[must_use]
    pub fn from_window(window: Window) -> Self {
        let Window { lutmax, lutmin } = window;
        let span = i64::from(lutmax) - i64::from(lutmin);

        if lutmin < lutmax {
            Self::Linear {
                gain: 256.0 / (span + 1) as f64,
                base: f64::from(lutmin),
            }
        } else if lutmin > lutmax {
            Self::Linear {
                gain: 256.0 / (span - 1) as f64,
                base: f64::from(lutmax),
            }
        } else if lutmin > 0 {
            Self::Threshold { level: lutmin }
        } else {
            Self::Shift
        }
    }

    /// Display intensity for unsigned sample `u`
    #[inline(always)]
    #[must_use]
    pub fn apply(&self, u: u16) -> u8 {
        match *self {
            Self::Linear { gain, base } => linear(u, gain, base),
            Self::Threshold { level } => threshold(u, level),
            Self::Shift => shift(u),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { gain, base } => write!(f, "linear (gain {gain:.6}, base {base})"),
            Self::Threshold { level } => write!(f, "threshold at {level}"),
            Self::Shift => write!(f, "shift (>> 8)"),
        }
    }
}

#[inline(always)]
pub(crate) fn linear(u: u16, gain: f64, base: f64) -> u8 {
    let v = gain * (f64::from(u) - base);
    // `as` truncates toward zero
    v.clamp(0.0, 255.0) as u8
}

#[inline(always)]
pub(crate) fn threshold(u: u16, level: i32) -> u8 {
    if i32::from(u) >= level { 255 } else { 0 }
}

#[inline(always)]
pub(crate) fn shift(u: u16) -> u8 {
    (u >> 8) as u8
}

/// Pack a gray level into an opaque `0xAARRGGBB` word
#[inline(always)]
#[must_use]
pub fn pack_gray(c: u8) -> u32 {
    let c = u32::from(c);
    ALPHA_OPAQUE | (c << 16) | (c << 8) | c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    fn gain_base(t: Transform) -> (f64, f64) {
        match t {
            Transform::Linear { gain, base } => (gain, base),
            other => panic!("expected linear transform, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(Transform::from_window(Window::new(0, 0)), Transform::Shift);
        assert_eq!(Transform::from_window(Window::new(-5, -5)), Transform::Shift);
        assert_eq!(
            Transform::from_window(Window::new(1000, 1000)),
            Transform::Threshold { level: 1000 }
        );
        assert_matches!(
            Transform::from_window(Window::new(100, 0)),
            Transform::Linear { .. }
        );
        assert_matches!(
            Transform::from_window(Window::new(0, 100)),
            Transform::Linear { .. }
        );
    }

    #[test]
    fn test_normal_window_coefficients() {
        let (gain, base) = gain_base(Transform::from_window(Window::new(1255, 1000)));
        assert_relative_eq!(gain, 1.0);
        assert_relative_eq!(base, 1000.0);
    }

    #[test]
    fn test_inverted_window_coefficients() {
        // lutmax - lutmin - 1 = -256
        let (gain, base) = gain_base(Transform::from_window(Window::new(1000, 1255)));
        assert_relative_eq!(gain, -1.0);
        assert_relative_eq!(base, 1000.0);
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let (gain, base) = gain_base(Transform::from_window(Window::new(i32::MAX, i32::MIN)));
        assert!(gain > 0.0 && gain < 1e-7);
        assert_relative_eq!(base, f64::from(i32::MIN));

        let (gain, _) = gain_base(Transform::from_window(Window::new(i32::MIN, i32::MAX)));
        assert!(gain < 0.0 && gain > -1e-7);
    }

    #[test]
    fn test_shift_is_top_byte_for_every_sample() {
        let t = Transform::from_window(Window::identity());
        for u in 0..=u16::MAX {
            assert_eq!(t.apply(u), (u >> 8) as u8, "u = {u}");
        }
    }

    #[test]
    fn test_threshold_for_every_sample() {
        for k in [1, 2, 255, 32768, 65535, 70000] {
            let t = Transform::from_window(Window::threshold(k));
            for u in 0..=u16::MAX {
                let expected = if i32::from(u) < k { 0 } else { 255 };
                assert_eq!(t.apply(u), expected, "k = {k}, u = {u}");
            }
        }
    }

    #[test]
    fn test_linear_window_is_monotonic_and_saturates() {
        for (lutmin, lutmax) in [(0, 65535), (1000, 3000), (200, 201), (40000, 40255)] {
            let t = Transform::from_window(Window::new(lutmax, lutmin));
            let mut prev = 0u8;
            for u in 0..=u16::MAX {
                let c = t.apply(u);
                assert!(c >= prev, "not monotonic at u = {u} for [{lutmin}, {lutmax}]");
                if i32::from(u) <= lutmin {
                    assert_eq!(c, 0, "u = {u} below window [{lutmin}, {lutmax}]");
                }
                if i32::from(u) > lutmax {
                    assert_eq!(c, 255, "u = {u} above window [{lutmin}, {lutmax}]");
                }
                prev = c;
            }
        }
    }

    #[test]
    fn test_linear_window_is_linear_inside() {
        // gain 1.0 over [1000, 1255]
        let t = Transform::from_window(Window::new(1255, 1000));
        for u in 1000..=1255u16 {
            assert_eq!(t.apply(u), (u - 1000) as u8);
        }
    }

    #[test]
    fn test_wide_window_reaches_white_at_lutmax() {
        let t = Transform::from_window(Window::new(65535, 0));
        assert_eq!(t.apply(65535), 255);
        assert_eq!(t.apply(32768), 128);
        assert_eq!(t.apply(100), 0);
        assert_eq!(t.apply(0), 0);
    }

    #[test]
    fn test_inverted_window_is_non_increasing() {
        for (lutmin, lutmax) in [(65535, 0), (3000, 1000), (40255, 40000)] {
            let t = Transform::from_window(Window::new(lutmax, lutmin));
            let mut prev = 255u8;
            for u in 0..=u16::MAX {
                let c = t.apply(u);
                assert!(c <= prev, "not non-increasing at u = {u} for [{lutmin}, {lutmax}]");
                prev = c;
            }
        }
    }

    #[test]
    fn test_inverted_window_values() {
        // gain -1.0, base 1000: brightest below lutmax, black from lutmax up
        let t = Transform::from_window(Window::new(1000, 1255));
        assert_eq!(t.apply(1000), 0);
        assert_eq!(t.apply(2000), 0);
        assert_eq!(t.apply(900), 100);
        assert_eq!(t.apply(0), 255);
    }

    #[test]
    fn test_pack_gray_replicates_channels() {
        assert_eq!(pack_gray(0), 0xff00_0000);
        assert_eq!(pack_gray(0x80), 0xff80_8080);
        assert_eq!(pack_gray(255), 0xffff_ffff);
    }
}
