use anyhow::{anyhow, Result};
use image::{DynamicImage, RgbImage};
use viuer::{print, Config as ViuerConfig};
use crate::cli::Args;
use std::io::{IsTerminal, Write};

pub fn print_image(image: RgbImage, args: &Args) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();

    let (config_width, config_height) = match (args.width, args.height) {
        (Some(w), ..) => (Some(w), None),
        (None, Some(h)) => (None, Some(h)),
        (None, None) => (Some(24), None),
    };

    let config = ViuerConfig {
        width: config_width,
        height: config_height,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

    print(&DynamicImage::ImageRgb8(image), &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}
