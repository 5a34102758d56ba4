pub mod bitmap;
pub mod cli;
pub mod convert;
pub mod display;
pub mod display_metadata;
pub mod error;
pub mod frame;
pub mod input;
pub mod pixel_type;
pub mod types;

// Re-export commonly used items
pub use bitmap::{Bitmap, BitmapLock, Rgb32Buffer};
pub use convert::{Transform, convert_mono16_to_rgb32, copy_to_bitmap};
pub use display_metadata::print_frame_info;
pub use error::CopyError;
pub use frame::SourceFrame;
pub use pixel_type::{BitmapFormat, PixelType};
pub use types::{Dimensions, Region, Window};
