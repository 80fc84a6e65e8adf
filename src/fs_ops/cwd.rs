//! Process working directory and executable-path introspection.
//! The cwd is genuinely global process state: these are the only functions
//! in the crate that touch it. Path resolution elsewhere takes an explicit
//! base instead (see `path_util::expand_file_name`), so changing the cwd
//! affects callers only at this boundary.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::io_error_with_help_io;
use crate::path_util;

/// The process-wide working directory.
pub fn current_directory() -> io::Result<PathBuf> {
    env::current_dir()
}

/// Change the process-wide working directory. This affects relative-path
/// resolution in every thread; concurrent callers must serialize around it.
pub fn set_current_directory(dir: &Path) -> io::Result<()> {
    env::set_current_dir(dir).map_err(io_error_with_help_io("set current directory", dir))
}

/// Absolute path of the running executable. Prefers OS introspection and
/// falls back to interpreting `argv0` against the current directory.
pub fn exe_file_name(argv0: &str) -> io::Result<PathBuf> {
    if let Ok(exe) = env::current_exe() {
        return Ok(exe);
    }
    let arg = Path::new(argv0);
    if arg.is_absolute() {
        return Ok(arg.to_path_buf());
    }
    Ok(path_util::expand_file_name(arg, &env::current_dir()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn set_and_get_current_directory() {
        let original = current_directory().unwrap();
        let td = tempdir().unwrap();

        set_current_directory(td.path()).unwrap();
        let now = current_directory().unwrap();
        // Compare canonical forms: the tempdir may live behind a symlink.
        assert_eq!(
            now.canonicalize().unwrap(),
            td.path().canonicalize().unwrap()
        );

        set_current_directory(&original).unwrap();
    }

    #[test]
    #[serial]
    fn set_current_directory_missing_path_fails() {
        let td = tempdir().unwrap();
        let err = set_current_directory(&td.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn exe_file_name_resolves() {
        let exe = exe_file_name("fallback-name").unwrap();
        assert!(exe.is_absolute());
    }
}
