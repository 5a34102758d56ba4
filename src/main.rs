use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use lutview::cli::Args;
use lutview::input::{self, FrameData};
use lutview::{Bitmap, BitmapFormat, Region, display};

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    let multiple_files = args.files.len() > 1;
    let mut any_failed = false;

    for (idx, file_path) in args.files.iter().enumerate() {
        if multiple_files {
            println!("{}", file_path.display());
        }

        if let Err(e) = process_file(file_path, idx, &args) {
            println!("Error: {e:#}");
            any_failed = true;
        }

        if multiple_files && idx < args.files.len() - 1 {
            println!();
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

/// Load, window and show (or save) a single frame
fn process_file(file_path: &std::path::Path, idx: usize, args: &Args) -> Result<()> {
    // Stage 1: Load frame bytes
    let data: FrameData = match args.raw {
        Some(size) => input::load_raw(file_path, size, args.rowbytes)?,
        None => input::load_image(file_path)?,
    };
    let frame = data.frame()?;

    // Stage 2: Resolve window and output size
    let window = args.window(&frame);
    let size = args.region.unwrap_or_else(|| frame.dimensions());

    // Stage 3: Convert into a fresh display bitmap
    let mut bitmap = Bitmap::new(size.width, size.height, BitmapFormat::Rgb32);
    let converted = lutview::copy_to_bitmap(&mut bitmap, &frame, Region::from_size(size), window)
        .with_context(|| format!("Failed to convert {}", file_path.display()))?;

    // Stage 4: Verbose output
    if args.verbose {
        lutview::print_frame_info(file_path, &frame, window, converted);
    }

    // Stage 5: Save or display
    let image = bitmap.to_rgb_image();
    match args.output_path(idx) {
        Some(out) => image
            .save(&out)
            .with_context(|| format!("Failed to save {}", out.display()))?,
        None => display::print_image(image, args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, RgbImage};
    use lutview::{CopyError, PixelType};
    use std::ffi::OsStr;

    #[test]
    fn test_luma16_png_is_windowed_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("frame.png");
        let output = dir.path().join("view.png");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 2, vec![0, 65535, 32768, 100]).unwrap();
        img.save(&input).unwrap();

        let args = Args::parse_from([
            OsStr::new("lutview"),
            OsStr::new("--lutmin"),
            OsStr::new("0"),
            OsStr::new("--lutmax"),
            OsStr::new("65535"),
            OsStr::new("-o"),
            output.as_os_str(),
            input.as_os_str(),
        ]);
        process_file(&input, 0, &args).unwrap();

        let view = image::open(&output).unwrap().into_rgb8();
        assert_eq!(view.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(view.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(view.get_pixel(0, 1).0, [128, 128, 128]);
        assert_eq!(view.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_rgb_input_reports_unsupported_pixel_type() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("color.png");
        let output = dir.path().join("view.png");
        RgbImage::new(2, 2).save(&input).unwrap();

        let args = Args::parse_from([
            OsStr::new("lutview"),
            OsStr::new("-o"),
            output.as_os_str(),
            input.as_os_str(),
        ]);
        let err = process_file(&input, 0, &args).unwrap_err();

        assert_matches::assert_matches!(
            err.downcast_ref::<CopyError>(),
            Some(CopyError::UnsupportedSourcePixelType(PixelType::Rgb24))
        );
        assert!(!output.exists());
    }
}
