//! Core library for `diskfs`.
//!
//! Cross-platform filesystem primitives behind one semantic contract:
//! sparse-file allocation, atomic rename with backup, durable data and
//! directory-metadata flushes, directory enumeration (live or snapshot),
//! path/filename manipulation, and a stateful read/write/seek file session.
//! Every operation is synchronous and blocking; instances are single-thread
//! affine and release their OS resources on drop.
//!
//! The library emits diagnostics through `tracing` and never installs a
//! subscriber; that belongs to the embedding application.

pub mod dir_reader;
pub mod errors;
pub mod file_handle;
pub mod fs_ops;
pub mod path_util;

mod platform;

pub use dir_reader::DirReader;
pub use errors::{DiskFsError, last_error_message};
pub use file_handle::{FileHandle, OpenMode, SeekOrigin};
