//! POSIX implementations of the platform surface.

use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Available bytes on the filesystem holding `path`, via statvfs.
/// Counts blocks available to unprivileged callers (`f_bavail`), not the
/// root-reserved total.
pub fn free_space_bytes(path: &Path) -> io::Result<u64> {
    use std::os::unix::ffi::OsStrExt;
    let cpath = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;
    let mut s: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(cpath.as_ptr(), &mut s) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok((s.f_bavail as u64).saturating_mul(s.f_frsize as u64))
}

/// Flush the directory's own metadata buffers so a preceding entry change
/// (rename/create/delete) survives a crash. The directory is opened read-only
/// just long enough to fsync it.
pub fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

/// Nothing to mark: a hole left by extending the file's length already reads
/// as zeros without allocating blocks.
pub fn mark_sparse(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Set the executable bits on `path`, preserving the rest of the mode.
pub fn fix_exec_permission(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perm = fs::metadata(path)?.permissions();
    perm.set_mode(perm.mode() | 0o111);
    fs::set_permissions(path, perm)
}
