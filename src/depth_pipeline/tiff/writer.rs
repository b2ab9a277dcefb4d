use std::io::Write;
use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::depth::DepthGrid;
use crate::depth_pipeline::tiff::types::TiffConfig;

pub trait DepthTiffWriter {
    fn write_tiff(&self, grid: &DepthGrid<'_>, output: &mut dyn Write, config: &TiffConfig) -> Result<()>;
}
