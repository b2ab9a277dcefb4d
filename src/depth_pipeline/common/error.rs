use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture sample is incomplete, missing: {0}")]
    NoData(String),

    #[error("Failed to create capture directory {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Depth grid {width}x{height} exceeds the 16-bit TIFF dimension limit")]
    DimensionOverflow { width: usize, height: usize },

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid buffer layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
