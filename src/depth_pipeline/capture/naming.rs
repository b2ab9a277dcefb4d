//! Directory and file naming
//!
//! Captures are grouped by calendar day and told apart by a timestamp stem
//! shared between the four artifacts of one sample.

use std::fmt;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::depth_pipeline::common::error::{CaptureError, Result};

/// The files produced for one capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Intrinsics,
    TiffDepth,
    RawDepth,
    ColorJpeg,
}

impl ArtifactKind {
    /// Write order of a capture
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Intrinsics,
        ArtifactKind::TiffDepth,
        ArtifactKind::RawDepth,
        ArtifactKind::ColorJpeg,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Intrinsics => "_intrinsics.dat",
            ArtifactKind::TiffDepth => "_depth.tiff",
            ArtifactKind::RawDepth => "_depth.raw",
            ArtifactKind::ColorJpeg => "_image.jpg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Intrinsics => "intrinsics",
            ArtifactKind::TiffDepth => "depth_tiff",
            ArtifactKind::RawDepth => "depth_raw",
            ArtifactKind::ColorJpeg => "image_jpeg",
        }
    }

    pub fn file_name(self, stem: &str) -> String {
        format!("{}{}", stem, self.suffix())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of wall-clock time for naming
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Name of the day directory for `now`.
pub fn date_key(now: &DateTime<Local>, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(CaptureError::InvalidConfig(format!(
            "invalid date format {:?}",
            format
        )));
    }

    let key = now.format_with_items(items.iter()).to_string();
    if key.is_empty() || key.contains(std::path::is_separator) || key == "." || key == ".." {
        return Err(CaptureError::InvalidConfig(format!(
            "date format {:?} does not yield a single directory name",
            format
        )));
    }
    Ok(key)
}

/// Seconds since the Unix epoch with microsecond fraction, e.g. `1732694400.123456`.
pub fn timestamp_stem(now: &DateTime<Local>) -> String {
    format_micros(now.timestamp_micros())
}

fn format_micros(micros: i64) -> String {
    format!(
        "{}.{:06}",
        micros.div_euclid(1_000_000),
        micros.rem_euclid(1_000_000)
    )
}

/// Hands out unique, non-decreasing filename stems.
///
/// Two captures within the same microsecond, or a clock that steps back,
/// reuse the previous timestamp with a `_<n>` counter appended. A stem is
/// also skipped while any artifact bearing it already exists in the
/// directory, so earlier captures are never overwritten.
#[derive(Debug, Default)]
pub struct StemAllocator {
    last: Option<(i64, u32)>,
}

impl StemAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, directory: &Path, now: &DateTime<Local>) -> String {
        let mut micros = now.timestamp_micros();
        let mut counter = 0;

        if let Some((last_micros, last_counter)) = self.last {
            if micros <= last_micros {
                micros = last_micros;
                counter = last_counter + 1;
            }
        }

        let base = format_micros(micros);
        loop {
            let candidate = if counter == 0 {
                base.clone()
            } else {
                format!("{}_{}", base, counter)
            };

            let taken = ArtifactKind::ALL
                .iter()
                .any(|kind| directory.join(kind.file_name(&candidate)).exists());

            if !taken {
                self.last = Some((micros, counter));
                return candidate;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, micros: u32) -> DateTime<Local> {
        Local.timestamp_opt(secs, micros * 1000).unwrap()
    }

    #[test]
    fn test_file_names() {
        let names: Vec<String> = ArtifactKind::ALL
            .iter()
            .map(|k| k.file_name("1732694400.500000"))
            .collect();
        assert_eq!(
            names,
            vec![
                "1732694400.500000_intrinsics.dat",
                "1732694400.500000_depth.tiff",
                "1732694400.500000_depth.raw",
                "1732694400.500000_image.jpg",
            ]
        );
    }

    #[test]
    fn test_timestamp_stem_has_fraction() {
        assert_eq!(timestamp_stem(&at(1_732_694_400, 42)), "1732694400.000042");
    }

    #[test]
    fn test_date_key_default_format() {
        let now = Local.with_ymd_and_hms(2024, 11, 27, 15, 30, 0).unwrap();
        assert_eq!(
            date_key(&now, "%Y%m%d_with_parameters").unwrap(),
            "20241127_with_parameters"
        );
    }

    #[test]
    fn test_date_key_rejects_bad_formats() {
        let now = at(0, 0);
        assert!(matches!(date_key(&now, "%Q"), Err(CaptureError::InvalidConfig(_))));
        assert!(matches!(date_key(&now, "%Y/%m"), Err(CaptureError::InvalidConfig(_))));
        assert!(matches!(date_key(&now, ""), Err(CaptureError::InvalidConfig(_))));
    }

    #[test]
    fn test_same_instant_gets_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut stems = StemAllocator::new();
        let now = at(1_732_694_400, 500_000);

        assert_eq!(stems.allocate(dir.path(), &now), "1732694400.500000");
        assert_eq!(stems.allocate(dir.path(), &now), "1732694400.500000_1");
        assert_eq!(stems.allocate(dir.path(), &now), "1732694400.500000_2");
    }

    #[test]
    fn test_clock_stepping_back_stays_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let mut stems = StemAllocator::new();

        assert_eq!(stems.allocate(dir.path(), &at(100, 0)), "100.000000");
        assert_eq!(stems.allocate(dir.path(), &at(99, 0)), "100.000000_1");
        assert_eq!(stems.allocate(dir.path(), &at(101, 0)), "101.000000");
    }

    #[test]
    fn test_existing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("100.000000_depth.raw"), b"taken").unwrap();

        let mut stems = StemAllocator::new();
        assert_eq!(stems.allocate(dir.path(), &at(100, 0)), "100.000000_1");
    }
}
