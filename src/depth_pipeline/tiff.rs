//! TIFF writing module
//!
//! This module writes depth grids as single-band 32-bit float TIFF images.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::DepthTiffWriter;
pub use standard_tiff_writer::{StandardTiffWriter, MAX_TIFF_DIMENSION, rows_per_strip};
pub use types::{TiffConfig, TiffConfigBuilder};
