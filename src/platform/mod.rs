//! Platform-specific primitives.
//! This module hides OS differences (Unix/Windows) behind a uniform API
//! selected at build time, so the rest of the crate carries no conditional
//! branches for free-space queries, sparse allocation, or directory flushes.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{fix_exec_permission, free_space_bytes, fsync_dir, mark_sparse};

#[cfg(not(unix))]
pub use windows::{free_space_bytes, fsync_dir, mark_sparse};
