use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth::DepthGrid;
use crate::depth_pipeline::intrinsics::Intrinsics;
use crate::depth_pipeline::jpeg::ColorImage;

/// One capture's worth of input, borrowed from the frame source.
///
/// Any part may be missing when the source has not produced it yet. A sample
/// is only persisted when all three parts are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthSample<'a> {
    pub depth: Option<DepthGrid<'a>>,
    pub color: Option<ColorImage<'a>>,
    pub intrinsics: Option<Intrinsics>,
}

impl<'a> DepthSample<'a> {
    pub fn new(depth: DepthGrid<'a>, color: ColorImage<'a>, intrinsics: Intrinsics) -> Self {
        Self {
            depth: Some(depth),
            color: Some(color),
            intrinsics: Some(intrinsics),
        }
    }

    /// Returns every part of the sample, or `NoData` naming what is missing.
    pub fn complete(&self) -> Result<(DepthGrid<'a>, ColorImage<'a>, Intrinsics)> {
        match (self.depth, self.color, self.intrinsics) {
            (Some(depth), Some(color), Some(intrinsics)) => Ok((depth, color, intrinsics)),
            (depth, color, intrinsics) => {
                let missing: Vec<&str> = [
                    (depth.is_none(), "depth"),
                    (color.is_none(), "color image"),
                    (intrinsics.is_none(), "intrinsics"),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                Err(CaptureError::NoData(missing.join(", ")))
            }
        }
    }
}
