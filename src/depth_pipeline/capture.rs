//! Capture orchestration
//!
//! Drives the artifact encoders for one sample and writes their output into a
//! per-day directory under a shared filename stem.

mod config;
mod naming;
mod atomic;
mod report;
mod session;
mod timing;


pub use config::{CaptureConfig, CaptureConfigBuilder, DEFAULT_DATE_FORMAT, default_documents_root};
pub use naming::{ArtifactKind, Clock, StemAllocator, SystemClock, date_key, timestamp_stem};
pub use atomic::write_atomically;
pub use report::{ArtifactOutcome, CaptureReport, LastCapture};
pub use session::{CaptureSession, SessionState};
pub use timing::{PipelineTimings, StepTiming, Timer};
