//! Directory enumeration behind a single type.
//! - Live mode holds the OS listing handle and yields entries lazily.
//! - Snapshot mode drains every entry at construction and releases the handle
//!   immediately; later mutation of the directory is invisible to the reader.
//! Dropping the reader releases whichever resource it owns.

use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::io;
use std::path::Path;

use crate::errors::io_error_with_help_io;

/// Enumerates the entries of one directory, live or from a snapshot.
/// `.` and `..` are never produced.
#[derive(Debug)]
pub struct DirReader {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Live(ReadDir),
    Snapshot(std::vec::IntoIter<OsString>),
}

impl DirReader {
    /// Open a live, lazy enumeration. Finite and non-restartable; entries
    /// created or removed during iteration may or may not be observed.
    pub fn open(dir: &Path) -> io::Result<Self> {
        let rd = fs::read_dir(dir).map_err(io_error_with_help_io("open directory", dir))?;
        Ok(Self {
            inner: Inner::Live(rd),
        })
    }

    /// Capture the full entry list up front. The OS handle is released before
    /// this returns, so the caller may freely mutate the directory while
    /// iterating the captured names.
    pub fn snapshot(dir: &Path) -> io::Result<Self> {
        let rd = fs::read_dir(dir).map_err(io_error_with_help_io("open directory", dir))?;
        let mut entries = Vec::new();
        for entry in rd {
            let entry = entry.map_err(io_error_with_help_io("read directory entry", dir))?;
            entries.push(entry.file_name());
        }
        Ok(Self {
            inner: Inner::Snapshot(entries.into_iter()),
        })
    }

    /// The next entry name, or `None` once the sequence is exhausted.
    pub fn next_name(&mut self) -> Option<io::Result<OsString>> {
        match &mut self.inner {
            Inner::Live(rd) => rd.next().map(|res| res.map(|e| e.file_name())),
            Inner::Snapshot(names) => names.next().map(Ok),
        }
    }
}

impl Iterator for DirReader {
    type Item = io::Result<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_name()
    }
}
