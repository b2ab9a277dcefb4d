use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::depth_pipeline::capture::naming::ArtifactKind;
use crate::depth_pipeline::capture::timing::PipelineTimings;
use crate::depth_pipeline::common::error::Result;

/// Result of writing one artifact. `Ok` carries the number of bytes written.
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub result: Result<u64>,
}

impl ArtifactOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a capture: which artifacts were produced and which failed.
#[derive(Debug)]
pub struct CaptureReport {
    pub directory: PathBuf,
    pub stem: String,
    pub outcomes: Vec<ArtifactOutcome>,
    pub timings: PipelineTimings,
}

impl CaptureReport {
    pub fn outcome(&self, kind: ArtifactKind) -> Option<&ArtifactOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }

    pub fn path_of(&self, kind: ArtifactKind) -> Option<&Path> {
        self.outcome(kind).map(|o| o.path.as_path())
    }

    pub fn succeeded(&self) -> Vec<ArtifactKind> {
        self.outcomes.iter().filter(|o| o.is_ok()).map(|o| o.kind).collect()
    }

    pub fn failed(&self) -> Vec<ArtifactKind> {
        self.outcomes.iter().filter(|o| !o.is_ok()).map(|o| o.kind).collect()
    }

    /// All four artifacts were written.
    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == ArtifactKind::ALL.len() && self.outcomes.iter().all(|o| o.is_ok())
    }
}

/// Published once per finished capture for display.
#[derive(Debug, Clone)]
pub struct LastCapture {
    pub image: RgbImage,
    pub directory: PathBuf,
    pub stem: String,
    pub produced: Vec<ArtifactKind>,
}
