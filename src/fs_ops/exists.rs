//! Existence, size, emptiness, and free-space queries.

use std::fs;
use std::io;
use std::path::Path;

use crate::dir_reader::DirReader;
use crate::errors::io_error_with_help_io;
use crate::platform;

/// True iff `path` names an existing regular file. Never errors: permission
/// problems and dangling links read as absent.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Split variant for callers that already track directory and name
/// separately.
pub fn file_exists_in(dir: &Path, name: &str) -> bool {
    file_exists(&dir.join(name))
}

/// True iff `path` names an existing directory.
pub fn directory_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Byte length of a regular file.
pub fn file_size(path: &Path) -> io::Result<u64> {
    let meta = fs::metadata(path).map_err(io_error_with_help_io("stat file", path))?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a regular file: {}", path.display()),
        ));
    }
    Ok(meta.len())
}

/// Available bytes on the filesystem holding `path`.
pub fn free_disk_size(path: &Path) -> io::Result<u64> {
    platform::free_space_bytes(path).map_err(io_error_with_help_io("query free space", path))
}

/// True iff enumerating `path` yields no entries. Missing or unreadable
/// directories read as non-empty so callers never treat them as removable.
pub fn dir_empty(path: &Path) -> bool {
    match DirReader::open(path) {
        Ok(mut reader) => reader.next_name().is_none(),
        Err(_) => false,
    }
}
