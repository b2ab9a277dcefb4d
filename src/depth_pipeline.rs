//! Depth capture persistence pipeline
//!
//! Turns one captured sample (depth grid, color buffer, camera intrinsics)
//! into four independent files: a raw float dump, a 32-bit float TIFF, an
//! intrinsics record and a JPEG of the color image.

pub mod common;
pub mod depth;
pub mod intrinsics;
pub mod raw;
pub mod tiff;
pub mod jpeg;
pub mod capture;

pub use common::{
    CaptureError,
    Result,
};

pub use depth::{
    DepthGrid,
    DepthSample,
    FrameCache,
    CapturedFrame,
    DepthFrame,
    ColorFrame,
    DepthSource,
};

pub use intrinsics::{
    Intrinsics,
    IntrinsicsCodec,
    INTRINSICS_RECORD_LEN,
};

pub use raw::RawDepthWriter;

pub use self::tiff::{
    DepthTiffWriter,
    StandardTiffWriter,
    TiffConfig,
    TiffConfigBuilder,
    MAX_TIFF_DIMENSION,
};

pub use jpeg::{
    ColorImage,
    ColorSpace,
    PixelLayout,
    JpegEncoder,
    ImageJpegEncoder,
};

pub use capture::{
    ArtifactKind,
    ArtifactOutcome,
    CaptureConfig,
    CaptureConfigBuilder,
    CaptureReport,
    CaptureSession,
    LastCapture,
    SessionState,
};
