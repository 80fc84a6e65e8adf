//! Rename-with-backup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::errors::io_error_with_help;
use crate::platform;

/// Append `suffix` to a path's full name (after any extension).
fn with_appended(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Rename `path` to a backup name formed by appending `bak_part`
/// (`notes.txt` -> `notes.txt.bak`, or `notes.bak` when
/// `remove_old_extension` strips the extension first).
///
/// Collision policy: never overwrite. When the backup name is taken,
/// numbered candidates (`.bak2`, `.bak3`, ...) are probed until a free one is
/// found; the probe re-checks existence rather than locking, so a concurrent
/// creator can still win the race and the rename itself then fails. The
/// parent directory is flushed afterwards so the new entry survives a crash.
/// Returns the backup path actually used.
pub fn rename_bak(path: &Path, bak_part: &str, remove_old_extension: bool) -> Result<PathBuf> {
    let base = if remove_old_extension {
        path.with_extension("")
    } else {
        path.to_path_buf()
    };

    let mut candidate = with_appended(&base, &format!(".{bak_part}"));
    let mut n = 1u32;
    while candidate.exists() {
        n += 1;
        candidate = with_appended(&base, &format!(".{bak_part}{n}"));
    }

    fs::rename(path, &candidate).map_err(io_error_with_help("rename to backup", path))?;
    if let Some(parent) = candidate.parent() {
        let _ = platform::fsync_dir(parent);
    }

    debug!(src = %path.display(), bak = %candidate.display(), "renamed to backup");
    Ok(candidate)
}
