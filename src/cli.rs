use crate::frame::SourceFrame;
use crate::types::{Dimensions, Window};
use clap::Parser;
use std::path::PathBuf;

/// Display 16-bit monochrome camera frames through a LUT window
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Frame file path(s): 16-bit grayscale images, or raw dumps with --raw
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Lower window bound (intensity shown as black)
    #[arg(long, allow_negative_numbers = true)]
    pub lutmin: Option<i32>,

    /// Upper window bound (intensity shown as white)
    #[arg(long, allow_negative_numbers = true)]
    pub lutmax: Option<i32>,

    /// Stretch each frame's own min..max range
    #[arg(short, long, conflicts_with_all = ["lutmin", "lutmax"])]
    pub auto: bool,

    /// Read files as raw native-endian mono16 of the given size (WIDTHxHEIGHT)
    #[arg(long, value_name = "WxH")]
    pub raw: Option<Dimensions>,

    /// Row stride of raw frames in bytes
    #[arg(long, requires = "raw")]
    pub rowbytes: Option<usize>,

    /// Size of the output bitmap (WIDTHxHEIGHT), defaults to the frame size
    #[arg(long, value_name = "WxH")]
    pub region: Option<Dimensions>,

    /// Save the converted image instead of printing it
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Output width in terminal columns
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Output height in terminal rows
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Show frame details and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Window for `frame` from the command line
    ///
    /// With neither bound given the frame is shown unwindowed; a single bound
    /// is completed with the full 16-bit range.
    #[must_use]
    pub fn window(&self, frame: &SourceFrame<'_>) -> Window {
        if self.auto {
            return frame
                .min_max()
                .map(|(min, max)| Window::from_range(min, max))
                .unwrap_or_default();
        }

        match (self.lutmin, self.lutmax) {
            (None, None) => Window::identity(),
            (lutmin, lutmax) => Window::new(
                lutmax.unwrap_or(i32::from(u16::MAX)),
                lutmin.unwrap_or(0),
            ),
        }
    }

    /// Output path for the `idx`-th file, numbered when several files are given
    #[must_use]
    pub fn output_path(&self, idx: usize) -> Option<PathBuf> {
        let out = self.output.as_ref()?;
        if self.files.len() <= 1 {
            return Some(out.clone());
        }

        let stem = out.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned());
        let name = match out.extension() {
            Some(ext) => format!("{stem}-{idx}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{idx}"),
        };
        Some(out.with_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_type::PixelType;

    fn frame_bytes(samples: &[u16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
    }

    #[test]
    fn test_parse_window_flags() {
        let args = Args::parse_from(["lutview", "--lutmin", "100", "--lutmax", "4000", "a.png"]);
        assert_eq!(args.lutmin, Some(100));
        assert_eq!(args.lutmax, Some(4000));
        assert_eq!(args.files, vec![PathBuf::from("a.png")]);
    }

    #[test]
    fn test_parse_raw_size() {
        let args = Args::parse_from(["lutview", "--raw", "640x480", "--rowbytes", "1536", "f.raw"]);
        assert_eq!(args.raw, Some(Dimensions::new(640, 480)));
        assert_eq!(args.rowbytes, Some(1536));
    }

    #[test]
    fn test_rowbytes_requires_raw() {
        assert!(Args::try_parse_from(["lutview", "--rowbytes", "8", "f.raw"]).is_err());
    }

    #[test]
    fn test_auto_conflicts_with_bounds() {
        assert!(Args::try_parse_from(["lutview", "--auto", "--lutmin", "3", "f.png"]).is_err());
    }

    #[test]
    fn test_window_resolution() {
        let buf = frame_bytes(&[300, 9000]);
        let frame = SourceFrame::new(&buf, 4, 2, 1, PixelType::Mono16).unwrap();

        let args = Args::parse_from(["lutview"]);
        assert_eq!(args.window(&frame), Window::identity());

        let args = Args::parse_from(["lutview", "--lutmin", "50"]);
        assert_eq!(args.window(&frame), Window::new(65535, 50));

        let args = Args::parse_from(["lutview", "--lutmax", "-1"]);
        assert_eq!(args.window(&frame), Window::new(-1, 0));

        let args = Args::parse_from(["lutview", "--auto"]);
        assert_eq!(args.window(&frame), Window::new(9000, 300));
    }

    #[test]
    fn test_output_path_numbering() {
        let args = Args::parse_from(["lutview", "-o", "out/view.png", "a.png"]);
        assert_eq!(args.output_path(0), Some(PathBuf::from("out/view.png")));

        let args = Args::parse_from(["lutview", "-o", "out/view.png", "a.png", "b.png"]);
        assert_eq!(args.output_path(1), Some(PathBuf::from("out/view-1.png")));

        let args = Args::parse_from(["lutview", "a.png"]);
        assert_eq!(args.output_path(0), None);
    }
}
