//! Whole-file convenience: load into memory, save from a buffer.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::errors::io_error_with_help;

/// Read the entire file into an owned byte buffer.
pub fn load_file_into_buffer(path: &Path) -> Result<Vec<u8>> {
    let buf = fs::read(path).map_err(io_error_with_help("load file", path))?;
    Ok(buf)
}

/// Write `buffer` over `path` (create-or-truncate) and flush the data to the
/// medium before returning.
pub fn save_buffer_into_file(path: &Path, buffer: &[u8]) -> Result<()> {
    let mut f = File::create(path).map_err(io_error_with_help("create file", path))?;
    f.write_all(buffer)
        .map_err(io_error_with_help("write file", path))?;
    f.sync_data()
        .map_err(io_error_with_help("sync file", path))?;
    Ok(())
}
