//! Color buffer types

use image::RgbImage;

use crate::depth_pipeline::common::error::{CaptureError, Result};

/// Byte layout of one color pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb8,
    Rgba8,
    /// Little-endian 32-bit BGRA, the usual camera preview layout
    Bgra8,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 | PixelLayout::Bgra8 => 4,
        }
    }

    fn to_rgb(self, px: &[u8]) -> [u8; 3] {
        match self {
            PixelLayout::Rgb8 | PixelLayout::Rgba8 => [px[0], px[1], px[2]],
            PixelLayout::Bgra8 => [px[2], px[1], px[0]],
        }
    }
}

/// Color space the encoded image is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    DisplayP3,
}

/// Borrowed color buffer, rows may be padded.
#[derive(Debug, Clone, Copy)]
pub struct ColorImage<'a> {
    width: usize,
    height: usize,
    row_stride: usize,
    layout: PixelLayout,
    data: &'a [u8],
}

impl<'a> ColorImage<'a> {
    pub fn new(
        width: usize,
        height: usize,
        row_stride: usize,
        layout: PixelLayout,
        data: &'a [u8],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidLayout(format!(
                "color image must not be empty ({}x{})",
                width, height
            )));
        }

        let row_bytes = width
            .checked_mul(layout.bytes_per_pixel())
            .ok_or_else(|| CaptureError::InvalidLayout(format!("row of {} pixels overflows", width)))?;
        let required = row_stride
            .checked_mul(height - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(|| CaptureError::InvalidLayout("color buffer size overflows".to_string()))?;

        if row_stride < row_bytes || data.len() < required {
            return Err(CaptureError::InvalidLayout(format!(
                "color buffer of {} bytes with stride {} cannot hold {}x{} {:?}",
                data.len(),
                row_stride,
                width,
                height,
                layout
            )));
        }

        Ok(Self {
            width,
            height,
            row_stride,
            layout,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Copies the buffer into an owned, tightly packed RGB image.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let width = u32::try_from(self.width)
            .map_err(|_| CaptureError::InvalidLayout(format!("width {} too large", self.width)))?;
        let height = u32::try_from(self.height)
            .map_err(|_| CaptureError::InvalidLayout(format!("height {} too large", self.height)))?;

        let bpp = self.layout.bytes_per_pixel();
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            let start = y * self.row_stride;
            let row = &self.data[start..start + self.width * bpp];
            for px in row.chunks_exact(bpp) {
                rgb.extend_from_slice(&self.layout.to_rgb(px));
            }
        }

        RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| CaptureError::InvalidLayout("RGB buffer size mismatch".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_with_padding_converts_to_rgb() {
        // 2x2 BGRA, stride 12 (4 bytes padding per row)
        let data = [
            1, 2, 3, 255, 4, 5, 6, 255, 0, 0, 0, 0, //
            7, 8, 9, 255, 10, 11, 12, 255,
        ];
        let image = ColorImage::new(2, 2, 12, PixelLayout::Bgra8, &data).unwrap();
        let rgb = image.to_rgb_image().unwrap();

        assert_eq!(rgb.dimensions(), (2, 2));
        assert_eq!(rgb.as_raw(), &vec![3, 2, 1, 6, 5, 4, 9, 8, 7, 12, 11, 10]);
    }

    #[test]
    fn test_rejects_short_buffer() {
        let data = [0u8; 11];
        let result = ColorImage::new(2, 2, 6, PixelLayout::Rgb8, &data);
        assert!(matches!(result, Err(CaptureError::InvalidLayout(_))));
    }
}
