use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::jpeg::types::{ColorImage, ColorSpace};

pub trait JpegEncoder {
    fn encode(&self, image: &ColorImage<'_>, color_space: ColorSpace) -> Result<Vec<u8>>;
}
