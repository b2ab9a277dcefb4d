use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use crate::depth_pipeline::common::error::Result;

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// The final path either holds the complete payload or does not exist.
/// An existing file at `path` is left alone and reported as an error.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<u64> {
    let directory = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )
    })?;

    let mut staged = NamedTempFile::new_in(directory)?;
    trace!(temp = %staged.path().display(), "Staging artifact");

    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist_noclobber(path).map_err(|e| e.error)?;

    Ok(bytes.len() as u64)
}
