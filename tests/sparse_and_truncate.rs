//! Sparse allocation and truncation observable properties.

use diskfs::DiskFsError;
use diskfs::fs_ops::{create_sparse_file, file_size, free_disk_size, truncate_file};
use std::fs;
use tempfile::tempdir;

#[test]
fn sparse_size_is_exact() {
    let td = tempdir().unwrap();
    let p = td.path().join("alloc.dat");
    create_sparse_file(&p, 1_048_576).unwrap();
    assert_eq!(file_size(&p).unwrap(), 1_048_576);
}

#[test]
fn sparse_file_reads_zero_everywhere() {
    let td = tempdir().unwrap();
    let p = td.path().join("zeros.dat");
    create_sparse_file(&p, 8192).unwrap();

    let data = fs::read(&p).unwrap();
    assert_eq!(data.len(), 8192);
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn sparse_creation_is_distinct_from_existing() {
    let td = tempdir().unwrap();
    let p = td.path().join("claimed.dat");
    fs::write(&p, b"already here").unwrap();

    let err = create_sparse_file(&p, 1024).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiskFsError>(),
        Some(DiskFsError::AlreadyExists(_))
    ));
}

#[test]
fn sparse_allocation_does_not_consume_logical_size_of_free_space() {
    let td = tempdir().unwrap();
    let before = free_disk_size(td.path()).unwrap();

    // Allocate a logical size far beyond what a zero-filled write of the
    // same length would plausibly leave untouched in a test environment.
    let p = td.path().join("big.dat");
    create_sparse_file(&p, 64 * 1024 * 1024).unwrap();

    let after = free_disk_size(td.path()).unwrap();
    // Free space may drift from unrelated activity; it must not drop by
    // anywhere near the 64 MiB logical size.
    assert!(before.saturating_sub(after) < 32 * 1024 * 1024);
}

#[test]
fn truncate_exact_grow_and_shrink() {
    let td = tempdir().unwrap();
    let p = td.path().join("cut.dat");
    fs::write(&p, b"abcdefgh").unwrap();

    truncate_file(&p, 3).unwrap();
    assert_eq!(file_size(&p).unwrap(), 3);
    assert_eq!(fs::read(&p).unwrap(), b"abc");

    truncate_file(&p, 100).unwrap();
    assert_eq!(file_size(&p).unwrap(), 100);
    let grown = fs::read(&p).unwrap();
    assert_eq!(&grown[..3], b"abc");
    assert!(grown[3..].iter().all(|&b| b == 0));
}
