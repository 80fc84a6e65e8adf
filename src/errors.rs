//! Typed error definitions and OS-error rendering.
//! Provides a small set of well-known failure modes for better logs and tests,
//! plus adapters that enrich io::Error with actionable context/hints.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::create_dir(dir).map_err(io_error_with_help("create directory", dir))?;
//!
//!   // in functions returning io::Result<_>
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use thiserror::Error;

/// Classified failure modes callers may want to branch on.
#[derive(Debug, Error)]
pub enum DiskFsError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied on {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Operation '{op}' not supported for {path}")]
    Unsupported { op: &'static str, path: PathBuf },

    #[error("{op} '{path}' failed: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiskFsError {
    /// Classify an io::Error against the path it occurred on.
    pub fn from_io(op: &'static str, path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => DiskFsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => DiskFsError::PermissionDenied {
                path: path.to_path_buf(),
                source: e,
            },
            io::ErrorKind::AlreadyExists => DiskFsError::AlreadyExists(path.to_path_buf()),
            io::ErrorKind::Unsupported => DiskFsError::Unsupported {
                op,
                path: path.to_path_buf(),
            },
            _ => DiskFsError::Io {
                op,
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}

/// Render the most recent OS error code as a human-readable string.
/// This is the diagnostic channel for callers that log rather than branch.
pub fn last_error_message() -> String {
    let e = io::Error::last_os_error();
    match e.raw_os_error() {
        Some(code) => format!("{} [os code: {}]", e, code),
        None => e.to_string(),
    }
}

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        // Platform-specific hints by raw OS code.
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" — permission denied; check ownership and write permissions.");
                }
                libc::EXDEV => {
                    msg.push_str(" — cross-filesystem; atomic rename not possible.");
                }
                libc::ENOENT => {
                    msg.push_str(" — path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" — already exists; pick a unique name or remove the target.");
                }
                libc::ENOTEMPTY => {
                    msg.push_str(" — directory not empty; remove its contents first.");
                }
                libc::ENOSPC => {
                    msg.push_str(" — insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" — read-only filesystem; cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" — filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            // Common Win32 errors
            match code {
                5 => msg.push_str(" — access denied; check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" — not same device; cross-filesystem move."), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" — sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" — path not found; verify it exists."), // FILE/PATH NOT FOUND
                80 => msg.push_str(" — already exists; pick a unique name."), // ERROR_FILE_EXISTS
                112 => msg.push_str(" — insufficient disk space."),          // ERROR_DISK_FULL
                145 => msg.push_str(" — directory not empty; remove its contents first."), // ERROR_DIR_NOT_EMPTY
                206 => msg.push_str(" — filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        // Include OS code for diagnostics
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        // Fallback to Kind-based hints
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" — permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" — path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" — already exists; remove or choose a unique name.");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code (when the surrounding function returns io::Result).
/// Preserves the original ErrorKind while enriching the message.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
