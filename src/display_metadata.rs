use crate::convert::Transform;
use crate::frame::SourceFrame;
use crate::types::{Dimensions, Window};
use std::path::Path;

pub fn print_frame_info(path: &Path, frame: &SourceFrame<'_>, window: Window, converted: Dimensions) {
    println!("{:20}: {}", "File", path.display());
    println!(
        "{:20}: {} [{}]",
        "Dimensions",
        frame.dimensions(),
        frame.pixel_type()
    );
    println!("{:20}: {}", "Row Bytes", frame.rowbytes());

    if let Some((min, max)) = frame.min_max() {
        println!("{:20}: {min}..{max}", "Intensity Range");
    }

    println!("{:20}: {}", "Window", window);
    println!("{:20}: {}", "Transform", Transform::from_window(window));
    println!("{:20}: {}", "Converted", converted);

    println!();
}
