//! Whole-file move, copy, and delete.
//! - Move renames atomically where the OS allows and falls back to
//!   copy+delete across volumes.
//! - Copy streams byte-for-byte with large buffers and flushes the result;
//!   metadata is not carried over.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::errors::io_error_with_help;
use crate::platform;

const COPY_BUF_SIZE: usize = 1024 * 1024;

/// Detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes;
/// std::io::ErrorKind has no stable cross-device variant.
fn is_cross_device(e: &io::Error) -> bool {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            // ERROR_NOT_SAME_DEVICE
            if code == 17 {
                return true;
            }
        }
    }
    false
}

/// Move `src` to `dst`. A same-volume move is a single atomic rename, after
/// which the destination directory is flushed so the new entry survives a
/// crash. A cross-volume move degrades to copy + delete and is not atomic.
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => {
            if let Some(parent) = dst.parent() {
                // A failed entry flush must not turn a completed rename into
                // a reported failure.
                let _ = platform::fsync_dir(parent);
            }
            debug!(src = %src.display(), dst = %dst.display(), "renamed file atomically");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(
                src = %src.display(),
                dst = %dst.display(),
                "cross-device rename; falling back to copy+delete"
            );
            copy_file(src, dst)?;
            fs::remove_file(src).map_err(io_error_with_help("remove source after copy", src))?;
            Ok(())
        }
        Err(e) => Err(io_error_with_help("rename file", src)(e))
            .with_context(|| format!("move '{}' -> '{}'", src.display(), dst.display())),
    }
}

/// Copy `src` to `dst` byte-for-byte (create-or-truncate), then flush the
/// destination's data to the medium.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let src_f = File::open(src).map_err(io_error_with_help("open source file", src))?;
    let dst_f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(io_error_with_help("create destination file", dst))?;

    let mut reader = BufReader::with_capacity(COPY_BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(COPY_BUF_SIZE, dst_f);
    let bytes =
        io::copy(&mut reader, &mut writer).map_err(io_error_with_help("copy file", dst))?;
    writer
        .flush()
        .map_err(io_error_with_help("flush destination file", dst))?;
    writer
        .get_ref()
        .sync_data()
        .map_err(io_error_with_help("sync destination file", dst))?;

    debug!(src = %src.display(), dst = %dst.display(), bytes, "copied file");
    Ok(())
}

/// Delete a regular file. Directories and symlinks are refused so callers
/// cannot unlink something they did not mean to.
pub fn delete_file(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(io_error_with_help("stat file", path))?;
    if !meta.file_type().is_file() {
        bail!("not a regular file: {}", path.display());
    }
    fs::remove_file(path).map_err(io_error_with_help("delete file", path))?;
    Ok(())
}
