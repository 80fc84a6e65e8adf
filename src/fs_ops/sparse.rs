//! Sparse allocation and exact-length truncation.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::errors::{DiskFsError, io_error_with_help};
use crate::platform;

/// Create a new file of logical length `size` without writing `size` zeros.
/// Unwritten regions read back as zeros. A pre-existing `path` is a distinct
/// `AlreadyExists` failure (downcastable to [`DiskFsError`]), never silently
/// reused.
///
/// A filesystem that refuses the sparse attribute degrades to plain length
/// extension, which still satisfies the read-as-zero contract.
pub fn create_sparse_file(path: &Path, size: u64) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| DiskFsError::from_io("create sparse file", path, e))?;

    if let Err(e) = platform::mark_sparse(&file) {
        debug!(
            path = %path.display(),
            error = %e,
            "sparse attribute rejected; extending without it"
        );
    }

    file.set_len(size)
        .map_err(io_error_with_help("extend file length", path))
        .with_context(|| format!("allocating {} bytes", size))?;

    debug!(path = %path.display(), size, "created sparse file");
    Ok(())
}

/// Set the exact logical length of an existing file, zero-extending or
/// discarding trailing data as needed.
pub fn truncate_file(path: &Path, size: u64) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| DiskFsError::from_io("truncate file", path, e))?;
    file.set_len(size)
        .map_err(io_error_with_help("set file length", path))?;
    Ok(())
}
