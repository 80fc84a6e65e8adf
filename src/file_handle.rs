//! Stateful single-file read/write/seek session.
//! Owns at most one descriptor for its lifetime; closing releases it
//! unconditionally and `Drop` covers callers that never close explicitly.
//! Carries an internal write buffer (off by default) and sticky eof/error
//! flags so a short read at end-of-file is distinguishable from a fault.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::errors::io_error_with_help_io;

/// How a [`FileHandle`] is opened; fixed for the handle's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only; the file must already exist.
    Read,
    /// Read and write; the file must already exist.
    ReadWrite,
    /// Write-only; creates the file or truncates an existing one.
    Write,
    /// Write-only at the end; creates the file or appends to an existing one.
    Append,
}

/// Reference point for [`FileHandle::seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekOrigin {
    Set,
    Current,
    End,
}

pub struct FileHandle {
    file: Option<File>,
    path: PathBuf,
    write_buf: Vec<u8>,
    write_buf_cap: usize,
    eof: bool,
    error: bool,
}

fn closed_error() -> io::Error {
    io::Error::other("file handle is closed")
}

impl FileHandle {
    /// Open `path` in the given mode. `Read` and `ReadWrite` fail with
    /// `NotFound` when the file does not pre-exist.
    pub fn open(path: &Path, mode: OpenMode) -> io::Result<Self> {
        let mut opts = OpenOptions::new();
        match mode {
            OpenMode::Read => opts.read(true),
            OpenMode::ReadWrite => opts.read(true).write(true),
            OpenMode::Write => opts.write(true).create(true).truncate(true),
            OpenMode::Append => opts.append(true).create(true),
        };
        let file = opts
            .open(path)
            .map_err(io_error_with_help_io("open file", path))?;

        debug!(path = %path.display(), ?mode, "opened file handle");
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            write_buf: Vec::new(),
            write_buf_cap: 0,
            eof: false,
            error: false,
        })
    }

    /// Whether the handle currently owns an open descriptor.
    pub fn active(&self) -> bool {
        self.file.is_some()
    }

    /// Sticky: a read has returned zero bytes at end-of-file.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Sticky: an I/O operation has failed since the handle was opened.
    pub fn error(&self) -> bool {
        self.error
    }

    /// Configure the internal write-buffer capacity; 0 disables buffering.
    /// Already-buffered bytes are pushed out first so no write is reordered.
    pub fn set_write_buffer(&mut self, size: usize) -> io::Result<()> {
        self.flush_write_buf()?;
        self.write_buf_cap = size;
        self.write_buf.shrink_to(size);
        Ok(())
    }

    fn flush_write_buf(&mut self) -> io::Result<()> {
        if self.write_buf.is_empty() {
            return Ok(());
        }
        let Some(file) = self.file.as_mut() else {
            return Err(closed_error());
        };
        if let Err(e) = file.write_all(&self.write_buf) {
            self.error = true;
            return Err(e);
        }
        self.write_buf.clear();
        Ok(())
    }

    /// Read up to `buf.len()` bytes; returns the count actually transferred.
    /// A zero return with a non-empty `buf` sets the sticky eof flag.
    pub fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.flush_write_buf()?;
        let Some(file) = self.file.as_mut() else {
            self.error = true;
            return Err(closed_error());
        };
        match file.read(buf) {
            Ok(0) if !buf.is_empty() => {
                self.eof = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) => {
                self.error = true;
                Err(e)
            }
        }
    }

    /// Write all of `buf`, through the internal buffer when one is
    /// configured; returns the count transferred.
    pub fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.file.is_none() {
            self.error = true;
            return Err(closed_error());
        }

        if self.write_buf_cap == 0 {
            let file = self.file.as_mut().expect("checked above");
            if let Err(e) = file.write_all(buf) {
                self.error = true;
                return Err(e);
            }
            return Ok(buf.len());
        }

        // Spill the buffer when this write would overflow it; oversized
        // writes bypass the buffer entirely.
        if self.write_buf.len() + buf.len() > self.write_buf_cap {
            self.flush_write_buf()?;
        }
        if buf.len() >= self.write_buf_cap {
            let file = self.file.as_mut().expect("checked above");
            if let Err(e) = file.write_all(buf) {
                self.error = true;
                return Err(e);
            }
        } else {
            self.write_buf.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    /// Formatted text write: `handle.print(format_args!("{} items\n", n))`.
    pub fn print(&mut self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        let text = fmt::format(args);
        self.write(text.as_bytes())
    }

    /// Current byte offset from the start of the file.
    pub fn position(&mut self) -> io::Result<u64> {
        self.flush_write_buf()?;
        let Some(file) = self.file.as_mut() else {
            return Err(closed_error());
        };
        file.stream_position()
    }

    /// Reposition the handle; returns the resulting absolute offset.
    /// Buffered writes are pushed out first, and a successful seek clears
    /// the sticky eof flag.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> io::Result<u64> {
        self.flush_write_buf()?;
        let from = match origin {
            SeekOrigin::Set => {
                let abs = u64::try_from(offset).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "negative absolute seek offset")
                })?;
                SeekFrom::Start(abs)
            }
            SeekOrigin::Current => SeekFrom::Current(offset),
            SeekOrigin::End => SeekFrom::End(offset),
        };
        let Some(file) = self.file.as_mut() else {
            self.error = true;
            return Err(closed_error());
        };
        match file.seek(from) {
            Ok(pos) => {
                self.eof = false;
                Ok(pos)
            }
            Err(e) => {
                self.error = true;
                Err(e)
            }
        }
    }

    /// Read one line: up to and including the next `\n`, or `max - 1` bytes,
    /// whichever comes first. Returns `None` at end-of-file with nothing
    /// read. Bytes are converted to text lossily.
    pub fn read_line(&mut self, max: usize) -> io::Result<Option<String>> {
        self.flush_write_buf()?;
        let limit = max.saturating_sub(1);
        let mut out: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 256];

        while out.len() < limit {
            let want = (limit - out.len()).min(chunk.len());
            let Some(file) = self.file.as_mut() else {
                self.error = true;
                return Err(closed_error());
            };
            let n = match file.read(&mut chunk[..want]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => n,
                Err(e) => {
                    self.error = true;
                    return Err(e);
                }
            };
            if let Some(pos) = chunk[..n].iter().position(|&b| b == b'\n') {
                out.extend_from_slice(&chunk[..=pos]);
                // Give back the bytes read past the terminator.
                let surplus = (n - pos - 1) as i64;
                if surplus > 0 {
                    if let Err(e) = file.seek(SeekFrom::Current(-surplus)) {
                        self.error = true;
                        return Err(e);
                    }
                }
                break;
            }
            out.extend_from_slice(&chunk[..n]);
        }

        if out.is_empty() && self.eof {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&out).into_owned()))
    }

    /// Push buffered writes out to the OS. This does not reach the storage
    /// medium; [`FileHandle::sync`] does.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_write_buf()?;
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Full durability for this file's content: buffered writes, OS buffers,
    /// and file metadata all reach the storage medium. The containing
    /// directory's entry is a separate guarantee (`flush_dir_buffers`).
    pub fn sync(&mut self) -> Result<()> {
        self.flush_write_buf()
            .with_context(|| format!("flush buffered writes for '{}'", self.path.display()))?;
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| anyhow!("file handle is closed: {}", self.path.display()))?;
        file.sync_all()
            .with_context(|| format!("sync '{}'", self.path.display()))?;
        Ok(())
    }

    /// Release the descriptor. Idempotent; the descriptor is dropped even
    /// when the final buffer flush fails, and that flush error is returned.
    pub fn close(&mut self) -> io::Result<()> {
        let flushed = self.flush_write_buf();
        self.write_buf.clear();
        self.file = None;
        flushed
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        // The descriptor itself is released by File's own Drop; only the
        // buffered bytes need a best-effort push.
        let _ = self.flush_write_buf();
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .field("active", &self.active())
            .field("eof", &self.eof)
            .field("error", &self.error)
            .finish()
    }
}
