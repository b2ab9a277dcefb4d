use std::io::{Cursor, Write};

use tiff::encoder::{colortype::Gray32Float, Compression, TiffEncoder};
use tiff::tags::{PlanarConfiguration, Tag};
use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth::DepthGrid;
use crate::depth_pipeline::tiff::types::TiffConfig;
use crate::depth_pipeline::tiff::writer::DepthTiffWriter;

/// Largest width or height the depth TIFF accepts. Dimensions are kept
/// within 16 bits so readers that store them as SHORT never truncate.
pub const MAX_TIFF_DIMENSION: usize = u16::MAX as usize;

/// Rows per strip for a grid, honouring the configured strip size.
pub fn rows_per_strip(width: usize, height: usize, config: &TiffConfig) -> u32 {
    let row_bytes = width.max(1) * DepthGrid::BYTES_PER_SAMPLE;
    let mut rows = (config.strip_target_bytes / row_bytes).max(1);
    if let Some(max) = config.max_rows_per_strip {
        rows = rows.min(max.max(1) as usize);
    }
    rows.min(height.max(1)) as u32
}

fn check_dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
    if width > MAX_TIFF_DIMENSION || height > MAX_TIFF_DIMENSION {
        return Err(CaptureError::DimensionOverflow { width, height });
    }
    Ok((width as u32, height as u32))
}

fn encode_error(e: tiff::TiffError) -> CaptureError {
    CaptureError::EncodeError(e.to_string())
}

pub struct StandardTiffWriter;

impl DepthTiffWriter for StandardTiffWriter {
    fn write_tiff(&self, grid: &DepthGrid<'_>, output: &mut dyn Write, config: &TiffConfig) -> Result<()> {
        let (width, height) = check_dimensions(grid.width(), grid.height())?;
        let rows_per_strip = rows_per_strip(grid.width(), grid.height(), config);

        debug!(
            "Encoding depth TIFF: {}x{}, {} rows per strip",
            width, height, rows_per_strip
        );

        // Samples are moved as f32 bit patterns straight from the source rows.
        let samples = grid.samples();

        let mut buffer: Vec<u8> = Vec::new();

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(encode_error)?
                .with_compression(Compression::Uncompressed);

            let mut image = encoder
                .new_image::<Gray32Float>(width, height)
                .map_err(encode_error)?;

            image.rows_per_strip(rows_per_strip).map_err(encode_error)?;
            image
                .encoder()
                .write_tag(Tag::PlanarConfiguration, PlanarConfiguration::Chunky.to_u16())
                .map_err(encode_error)?;

            image.write_data(&samples).map_err(encode_error)?;
        }

        output.write_all(&buffer)?;

        debug!("Depth TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
