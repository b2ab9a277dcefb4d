use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder as ImageCrateJpegEncoder;
use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::jpeg::encoder::JpegEncoder;
use crate::depth_pipeline::jpeg::types::{ColorImage, ColorSpace};

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// JPEG encoder backed by the `image` crate. Only sRGB output is supported.
pub struct ImageJpegEncoder {
    quality: u8,
}

impl ImageJpegEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for ImageJpegEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl JpegEncoder for ImageJpegEncoder {
    fn encode(&self, image: &ColorImage<'_>, color_space: ColorSpace) -> Result<Vec<u8>> {
        if color_space != ColorSpace::Srgb {
            return Err(CaptureError::EncodeError(format!(
                "unsupported JPEG color space {:?}",
                color_space
            )));
        }

        let rgb = image.to_rgb_image()?;
        debug!(
            "Encoding JPEG {}x{} at quality {}",
            rgb.width(),
            rgb.height(),
            self.quality
        );

        let mut buffer: Vec<u8> = Vec::new();
        ImageCrateJpegEncoder::new_with_quality(&mut buffer, self.quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::EncodeError(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth_pipeline::jpeg::types::PixelLayout;

    #[test]
    fn test_encodes_decodable_jpeg() {
        let width = 16;
        let height = 8;
        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        let image = ColorImage::new(width, height, width * 3, PixelLayout::Rgb8, &data).unwrap();

        let bytes = ImageJpegEncoder::default().encode(&image, ColorSpace::Srgb).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_rejects_non_srgb() {
        let data = [0u8; 3];
        let image = ColorImage::new(1, 1, 3, PixelLayout::Rgb8, &data).unwrap();
        let result = ImageJpegEncoder::default().encode(&image, ColorSpace::DisplayP3);
        assert!(matches!(result, Err(CaptureError::EncodeError(_))));
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ImageJpegEncoder::new(0).quality(), 1);
        assert_eq!(ImageJpegEncoder::new(250).quality(), 100);
    }
}
