//! Capture configuration types

use std::path::PathBuf;

use crate::depth_pipeline::jpeg::DEFAULT_JPEG_QUALITY;
use crate::depth_pipeline::tiff::TiffConfig;

/// chrono format of the per-day capture directory
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d_with_parameters";

/// Documents directory of the current user, falling back to the home
/// directory and then the working directory.
pub fn default_documents_root() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Root under which the per-day directories are created
    pub documents_root: PathBuf,
    /// chrono format string producing the day directory name
    pub date_format: String,
    /// JPEG quality (1-100) for the color image
    pub jpeg_quality: u8,
    /// Depth TIFF strip layout
    pub tiff: TiffConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            documents_root: default_documents_root(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            tiff: TiffConfig::default(),
        }
    }
}

impl CaptureConfig {
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }
}

/// Builder for CaptureConfig
#[derive(Default)]
pub struct CaptureConfigBuilder {
    documents_root: Option<PathBuf>,
    date_format: Option<String>,
    jpeg_quality: Option<u8>,
    tiff: Option<TiffConfig>,
}

impl CaptureConfigBuilder {
    pub fn documents_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.documents_root = Some(root.into());
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn tiff(mut self, tiff: TiffConfig) -> Self {
        self.tiff = Some(tiff);
        self
    }

    pub fn build(self) -> CaptureConfig {
        CaptureConfig {
            documents_root: self.documents_root.unwrap_or_else(default_documents_root),
            date_format: self.date_format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            jpeg_quality: self.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            tiff: self.tiff.unwrap_or_default(),
        }
    }
}
