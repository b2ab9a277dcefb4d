//! Depth frame representation
//!
//! Borrowed views over the frame source's buffers plus the owned cache that
//! holds the latest frame between update ticks.

mod grid;
mod sample;
mod frame_cache;

pub use grid::DepthGrid;
pub use sample::DepthSample;
pub use frame_cache::{CapturedFrame, DepthFrame, ColorFrame, DepthSource, FrameCache};
