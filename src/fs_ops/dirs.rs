//! Directory creation and removal, single-level and whole-tree.
//! Tree deletion is depth-first (children before parents), keeps going past
//! individual failures, and reports one aggregate error.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{io_error_with_help, io_error_with_help_io};

/// Create a single directory level; the parent must already exist.
pub fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir(path).map_err(io_error_with_help_io("create directory", path))
}

/// Remove a single empty directory.
pub fn remove_directory(path: &Path) -> io::Result<()> {
    fs::remove_dir(path).map_err(io_error_with_help_io("remove directory", path))
}

/// Create every missing ancestor along `path`. Idempotent: succeeding when
/// the whole chain already exists.
pub fn force_directories(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(io_error_with_help("create directory tree", path))?;
    Ok(())
}

/// Recursively delete `path` and everything under it.
///
/// Traversal is contents-first, so children go before their parents and the
/// root goes last. Individual failures do not abort the walk: every deletable
/// entry is still removed, and the result is a single error carrying the
/// failure count and the first failure's message. Entries that vanish
/// mid-walk count as deleted.
pub fn delete_directory_with_content(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(anyhow!("not a directory: {}", path.display()));
    }

    let mut failures: usize = 0;
    let mut first_error: Option<String> = None;

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                failures += 1;
                first_error.get_or_insert_with(|| e.to_string());
                continue;
            }
        };
        let p = entry.path();
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(p)
        } else {
            fs::remove_file(p)
        };
        if let Err(e) = removed {
            if e.kind() == io::ErrorKind::NotFound {
                continue;
            }
            warn!(path = %p.display(), error = %e, "could not delete entry");
            failures += 1;
            first_error
                .get_or_insert_with(|| format!("delete '{}': {}", p.display(), e));
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "failed to delete {} entr{} under '{}'; first error: {}",
            failures,
            if failures == 1 { "y" } else { "ies" },
            path.display(),
            first_error.unwrap_or_default()
        ));
    }

    debug!(path = %path.display(), "deleted directory tree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::directory_exists;
    use tempfile::tempdir;

    #[test]
    fn create_and_remove_single_level() {
        let td = tempdir().unwrap();
        let d = td.path().join("one");
        create_directory(&d).unwrap();
        assert!(directory_exists(&d));
        remove_directory(&d).unwrap();
        assert!(!directory_exists(&d));
    }

    #[test]
    fn create_requires_parent() {
        let td = tempdir().unwrap();
        let err = create_directory(&td.path().join("a/b/c")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn force_directories_is_idempotent() {
        let td = tempdir().unwrap();
        let deep = td.path().join("a").join("b").join("c");
        force_directories(&deep).unwrap();
        assert!(directory_exists(&deep));
        force_directories(&deep).unwrap();
    }

    #[test]
    fn delete_tree_nested() {
        let td = tempdir().unwrap();
        let root = td.path().join("tree");
        fs::create_dir_all(root.join("sub").join("deeper")).unwrap();
        fs::write(root.join("top.txt"), b"t").unwrap();
        fs::write(root.join("sub").join("mid.txt"), b"m").unwrap();
        fs::write(root.join("sub").join("deeper").join("leaf.txt"), b"l").unwrap();

        delete_directory_with_content(&root).unwrap();
        assert!(!directory_exists(&root));
    }

    #[test]
    fn delete_tree_rejects_non_directory() {
        let td = tempdir().unwrap();
        let f = td.path().join("plain.txt");
        fs::write(&f, b"x").unwrap();
        let err = delete_directory_with_content(&f).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
