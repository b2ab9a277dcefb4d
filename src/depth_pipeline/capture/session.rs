use std::fs;

use tracing::{error, info, instrument, warn};

use crate::depth_pipeline::capture::atomic::write_atomically;
use crate::depth_pipeline::capture::config::CaptureConfig;
use crate::depth_pipeline::capture::naming::{ArtifactKind, Clock, StemAllocator, SystemClock, date_key};
use crate::depth_pipeline::capture::report::{ArtifactOutcome, CaptureReport, LastCapture};
use crate::depth_pipeline::capture::timing::{PipelineTimings, Timer};
use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth::{DepthGrid, DepthSample};
use crate::depth_pipeline::intrinsics::{Intrinsics, IntrinsicsCodec};
use crate::depth_pipeline::jpeg::{ColorImage, ColorSpace, ImageJpegEncoder, JpegEncoder};
use crate::depth_pipeline::raw::RawDepthWriter;
use crate::depth_pipeline::tiff::{DepthTiffWriter, StandardTiffWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing,
}

type CaptureCallback = Box<dyn FnMut(LastCapture) + Send>;

/// Persists depth samples, one at a time.
///
/// Taking `&mut self` for a capture keeps invocations serialized; the
/// sample's buffers are only borrowed for the duration of the call.
pub struct CaptureSession<W: DepthTiffWriter, J: JpegEncoder, C: Clock> {
    tiff_writer: W,
    jpeg_encoder: J,
    clock: C,
    config: CaptureConfig,
    state: SessionState,
    stems: StemAllocator,
    on_capture: Option<CaptureCallback>,
}

impl CaptureSession<StandardTiffWriter, ImageJpegEncoder, SystemClock> {
    pub fn new(config: CaptureConfig) -> Self {
        let jpeg_encoder = ImageJpegEncoder::new(config.jpeg_quality);
        Self::with_custom(StandardTiffWriter, jpeg_encoder, SystemClock, config)
    }
}

impl<W: DepthTiffWriter, J: JpegEncoder, C: Clock> CaptureSession<W, J, C> {
    pub fn with_custom(tiff_writer: W, jpeg_encoder: J, clock: C, config: CaptureConfig) -> Self {
        Self {
            tiff_writer,
            jpeg_encoder,
            clock,
            config,
            state: SessionState::Idle,
            stems: StemAllocator::new(),
            on_capture: None,
        }
    }

    /// Registers the receiver of the last-capture notification, replacing any
    /// previous one. It runs once per capture that reached the artifact stage.
    pub fn on_capture<F>(&mut self, callback: F)
    where
        F: FnMut(LastCapture) + Send + 'static,
    {
        self.on_capture = Some(Box::new(callback));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CaptureConfig) {
        self.config = config;
    }

    /// Writes the four artifacts of `sample`.
    ///
    /// Fails as a whole only when the sample is incomplete or the
    /// destination directory cannot be prepared. Individual artifact
    /// failures are recorded in the returned report.
    #[instrument(skip(self, sample))]
    pub fn capture(&mut self, sample: &DepthSample<'_>) -> Result<CaptureReport> {
        let (depth, color, intrinsics) = sample.complete().inspect_err(|e| {
            warn!("Capture rejected: {}", e);
        })?;

        self.state = SessionState::Capturing;
        let report = self.write_artifacts(&depth, &color, &intrinsics);
        self.state = SessionState::Idle;

        let report = report?;
        self.publish(&color, &report);

        info!(
            directory = %report.directory.display(),
            stem = %report.stem,
            saved = report.succeeded().len(),
            failed = report.failed().len(),
            "Capture complete"
        );
        Ok(report)
    }

    fn write_artifacts(
        &mut self,
        depth: &DepthGrid<'_>,
        color: &ColorImage<'_>,
        intrinsics: &Intrinsics,
    ) -> Result<CaptureReport> {
        let now = self.clock.now();
        let directory = self
            .config
            .documents_root
            .join(date_key(&now, &self.config.date_format)?);

        {
            let _span = tracing::info_span!("create_directory", path = %directory.display()).entered();
            fs::create_dir_all(&directory).map_err(|source| {
                error!("Failed to create directory {}: {}", directory.display(), source);
                CaptureError::DirectoryCreateError {
                    path: directory.clone(),
                    source,
                }
            })?;
        }

        let stem = self.stems.allocate(&directory, &now);
        info!(
            directory = %directory.display(),
            stem = %stem,
            width = depth.width(),
            height = depth.height(),
            "Saving depth sample"
        );

        let mut timings = PipelineTimings::new();
        let mut outcomes = Vec::with_capacity(ArtifactKind::ALL.len());

        for kind in ArtifactKind::ALL {
            let path = directory.join(kind.file_name(&stem));

            let timer = Timer::start(kind.label());
            let result = {
                let _span = tracing::info_span!("write_artifact", artifact = kind.label()).entered();
                self.encode(kind, depth, color, intrinsics)
                    .and_then(|bytes| write_atomically(&path, &bytes))
            };
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);

            match &result {
                Ok(bytes) => info!(artifact = %kind, path = %path.display(), bytes = *bytes, "Artifact saved"),
                Err(e) => error!(artifact = %kind, path = %path.display(), "Failed to save artifact: {}", e),
            }

            outcomes.push(ArtifactOutcome { kind, path, result });
        }

        Ok(CaptureReport {
            directory,
            stem,
            outcomes,
            timings,
        })
    }

    fn encode(
        &self,
        kind: ArtifactKind,
        depth: &DepthGrid<'_>,
        color: &ColorImage<'_>,
        intrinsics: &Intrinsics,
    ) -> Result<Vec<u8>> {
        match kind {
            ArtifactKind::Intrinsics => Ok(IntrinsicsCodec::encode(intrinsics).to_vec()),
            ArtifactKind::TiffDepth => {
                let mut buffer: Vec<u8> = Vec::new();
                self.tiff_writer.write_tiff(depth, &mut buffer, &self.config.tiff)?;
                Ok(buffer)
            }
            ArtifactKind::RawDepth => Ok(RawDepthWriter::encode(depth)),
            ArtifactKind::ColorJpeg => self.jpeg_encoder.encode(color, ColorSpace::Srgb),
        }
    }

    fn publish(&mut self, color: &ColorImage<'_>, report: &CaptureReport) {
        let Some(callback) = self.on_capture.as_mut() else {
            return;
        };

        match color.to_rgb_image() {
            Ok(image) => callback(LastCapture {
                image,
                directory: report.directory.clone(),
                stem: report.stem.clone(),
                produced: report.succeeded(),
            }),
            Err(e) => warn!("Could not decode color image for display: {}", e),
        }
    }
}
