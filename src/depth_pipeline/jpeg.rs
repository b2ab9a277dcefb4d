//! Color image hand-off
//!
//! The color buffer is passed through untouched and handed to a JPEG encoder.

mod encoder;
mod image_jpeg_encoder;
pub mod types;

pub use encoder::JpegEncoder;
pub use image_jpeg_encoder::{ImageJpegEncoder, DEFAULT_JPEG_QUALITY};
pub use types::{ColorImage, ColorSpace, PixelLayout};
