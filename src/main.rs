use std::path::PathBuf;

use depth_capture_rs::depth_pipeline::{
    CaptureConfig, CaptureSession, CapturedFrame, ColorFrame, DepthFrame, FrameCache, Intrinsics,
    PixelLayout,
};
use depth_capture_rs::logger;

use tracing::{error, info};

// Scene depth resolution delivered alongside a 1920x1440 color frame.
const DEPTH_WIDTH: usize = 256;
const DEPTH_HEIGHT: usize = 192;
const COLOR_WIDTH: usize = 640;
const COLOR_HEIGHT: usize = 480;

/// A tilted plane with a padded row stride, standing in for a live depth map.
fn synthetic_depth() -> DepthFrame {
    let row_stride = DEPTH_WIDTH * 4 + 64;
    let mut data = vec![0u8; row_stride * DEPTH_HEIGHT];
    for y in 0..DEPTH_HEIGHT {
        for x in 0..DEPTH_WIDTH {
            let meters = 0.5 + x as f32 * 0.01 + y as f32 * 0.005;
            let at = y * row_stride + x * 4;
            data[at..at + 4].copy_from_slice(&meters.to_ne_bytes());
        }
    }
    DepthFrame {
        width: DEPTH_WIDTH,
        height: DEPTH_HEIGHT,
        row_stride,
        data,
        has_confidence: true,
    }
}

fn synthetic_color() -> ColorFrame {
    let row_stride = COLOR_WIDTH * 4;
    let mut data = vec![0u8; row_stride * COLOR_HEIGHT];
    for y in 0..COLOR_HEIGHT {
        for x in 0..COLOR_WIDTH {
            let at = y * row_stride + x * 4;
            data[at..at + 4].copy_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
    }
    ColorFrame {
        width: COLOR_WIDTH,
        height: COLOR_HEIGHT,
        row_stride,
        layout: PixelLayout::Bgra8,
        data,
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting depth capture...");

    let mut builder = CaptureConfig::builder();
    if let Some(root) = std::env::args_os().nth(1) {
        builder = builder.documents_root(PathBuf::from(root));
    }
    let config = builder.build();

    info!("Documents root: {}", config.documents_root.display());
    info!("Day directory format: {}", config.date_format);

    let mut session = CaptureSession::new(config);
    session.on_capture(|last| {
        info!(
            "Last capture {} ({}x{}), {} artifacts",
            last.stem,
            last.image.width(),
            last.image.height(),
            last.produced.len()
        );
    });

    let mut frames = FrameCache::new();
    frames.update(CapturedFrame {
        depth: Some(synthetic_depth()),
        color: Some(synthetic_color()),
        intrinsics: Some(Intrinsics::new(1450.5, 1450.5, 959.5, 719.5)),
    });

    let sample = frames.sample()?;
    match session.capture(&sample) {
        Ok(report) => {
            report.timings.log_summary();
            for outcome in &report.outcomes {
                if let Err(e) = &outcome.result {
                    error!("{} was not saved: {}", outcome.kind, e);
                }
            }
            info!("Saved {} of 4 artifacts", report.succeeded().len());
        }
        Err(e) => error!("Capture failed: {}", e),
    }

    Ok(())
}
