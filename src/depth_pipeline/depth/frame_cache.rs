use tracing::debug;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::depth::{DepthGrid, DepthSample};
use crate::depth_pipeline::intrinsics::Intrinsics;
use crate::depth_pipeline::jpeg::{ColorImage, PixelLayout};

/// How the frame source produced its depth map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthSource {
    /// A confidence map accompanied the depth, which only the LiDAR path emits.
    Lidar,
    /// Depth inferred without a confidence map.
    Estimated,
}

/// Owned depth buffer as delivered by the frame source.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    pub row_stride: usize,
    pub data: Vec<u8>,
    pub has_confidence: bool,
}

impl DepthFrame {
    pub fn source(&self) -> DepthSource {
        if self.has_confidence {
            DepthSource::Lidar
        } else {
            DepthSource::Estimated
        }
    }
}

/// Owned color buffer as delivered by the frame source.
#[derive(Debug, Clone)]
pub struct ColorFrame {
    pub width: usize,
    pub height: usize,
    pub row_stride: usize,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

/// One update tick from the frame source.
#[derive(Debug, Clone, Default)]
pub struct CapturedFrame {
    pub depth: Option<DepthFrame>,
    pub color: Option<ColorFrame>,
    pub intrinsics: Option<Intrinsics>,
}

/// Keeps the most recent frame so a capture can be taken between ticks.
#[derive(Debug, Default)]
pub struct FrameCache {
    latest: CapturedFrame,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached frame. Parts absent from `frame` become absent
    /// in the cache too, so a stale depth map is never paired with a fresh image.
    pub fn update(&mut self, frame: CapturedFrame) {
        if let Some(depth) = &frame.depth {
            debug!(
                width = depth.width,
                height = depth.height,
                source = ?depth.source(),
                "Depth frame received"
            );
        }
        self.latest = frame;
    }

    pub fn latest(&self) -> &CapturedFrame {
        &self.latest
    }

    /// Borrows the cached buffers as a capture sample.
    pub fn sample(&self) -> Result<DepthSample<'_>> {
        let depth = self
            .latest
            .depth
            .as_ref()
            .map(|d| DepthGrid::new(d.width, d.height, d.row_stride, &d.data))
            .transpose()?;

        let color = self
            .latest
            .color
            .as_ref()
            .map(|c| ColorImage::new(c.width, c.height, c.row_stride, c.layout, &c.data))
            .transpose()?;

        Ok(DepthSample {
            depth,
            color,
            intrinsics: self.latest.intrinsics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth_pipeline::common::error::CaptureError;

    fn depth_frame(has_confidence: bool) -> DepthFrame {
        DepthFrame {
            width: 2,
            height: 2,
            row_stride: 8,
            data: vec![0u8; 16],
            has_confidence,
        }
    }

    #[test]
    fn test_empty_cache_yields_incomplete_sample() {
        let cache = FrameCache::new();
        let sample = cache.sample().unwrap();
        assert!(matches!(sample.complete(), Err(CaptureError::NoData(_))));
    }

    #[test]
    fn test_update_replaces_every_part() {
        let mut cache = FrameCache::new();
        cache.update(CapturedFrame {
            depth: Some(depth_frame(true)),
            color: Some(ColorFrame {
                width: 1,
                height: 1,
                row_stride: 3,
                layout: PixelLayout::Rgb8,
                data: vec![1, 2, 3],
            }),
            intrinsics: Some(Intrinsics::identity()),
        });
        assert!(cache.sample().unwrap().complete().is_ok());

        cache.update(CapturedFrame {
            depth: None,
            color: None,
            intrinsics: Some(Intrinsics::identity()),
        });
        let sample = cache.sample().unwrap();
        assert!(sample.depth.is_none());
        assert!(sample.color.is_none());
    }

    #[test]
    fn test_depth_source_from_confidence() {
        assert_eq!(depth_frame(true).source(), DepthSource::Lidar);
        assert_eq!(depth_frame(false).source(), DepthSource::Estimated);
    }

    #[test]
    fn test_malformed_depth_buffer_is_rejected() {
        let mut cache = FrameCache::new();
        let mut frame = depth_frame(false);
        frame.data.truncate(10);
        cache.update(CapturedFrame {
            depth: Some(frame),
            ..Default::default()
        });
        assert!(matches!(cache.sample(), Err(CaptureError::InvalidLayout(_))));
    }
}
