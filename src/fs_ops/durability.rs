//! Durability primitives: file-data flush and directory-metadata flush.
//! A rename can be data-safe yet lose the directory entry on crash unless
//! the parent directory's metadata is flushed separately; `flush_dir_buffers`
//! is that second half of the guarantee.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::errors::io_error_with_help;
use crate::platform;

/// Force the file's written data down to the storage medium. Data only: the
/// entry in the containing directory is covered by [`flush_dir_buffers`].
pub fn flush_file_buffers(file: &File) -> Result<()> {
    file.sync_data().context("flush file data buffers")?;
    Ok(())
}

/// Flush the metadata of `filename`'s parent directory so a preceding rename
/// or create of that entry survives a crash. On platforms where the file's
/// own flush already covers the entry this is a successful no-op.
pub fn flush_dir_buffers(filename: &Path) -> Result<()> {
    let parent = match filename.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    platform::fsync_dir(parent).map_err(io_error_with_help("flush directory buffers", parent))?;
    Ok(())
}
