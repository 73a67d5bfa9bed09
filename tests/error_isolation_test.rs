//! Integration tests for error isolation
//!
//! One unreadable file must produce exactly one error entry while every
//! other file in the batch is still classified and hashed.

use signature_scan_rs::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &[u8]) {
    let mut file = File::create(path).unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
}

/// A dangling symlink looks like a file that vanished mid-scan
#[cfg(unix)]
#[test]
fn test_dangling_link_yields_one_error() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("a.jpg"), &[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]);
    write_file(&temp_dir.path().join("b.pdf"), b"%PDF-1.7\n%%EOF");
    write_file(&temp_dir.path().join("c.txt"), b"not interesting");
    std::os::unix::fs::symlink(
        temp_dir.path().join("deleted.jpg"),
        temp_dir.path().join("broken.jpg"),
    )
    .unwrap();

    let result = scan(temp_dir.path(), false).unwrap();

    assert_eq!(result.files_scanned, 4);
    assert_eq!(result.records.len(), 2, "Both valid files should be recorded");
    assert_eq!(result.errors.len(), 1, "Exactly one error expected");
    assert!(result.errors[0].message.contains("broken.jpg"));
}

/// A file removed between enumeration and processing is reported, not fatal
#[test]
fn test_file_removed_before_processing() {
    let temp_dir = TempDir::new().unwrap();
    let keep = temp_dir.path().join("keep.pdf");
    let gone = temp_dir.path().join("gone.pdf");
    write_file(&keep, b"%PDF-1.4 body");
    write_file(&gone, b"%PDF-1.4 other");

    let (files, _) = collect_files(temp_dir.path(), false).unwrap();
    fs::remove_file(&gone).unwrap();

    let processor = FileProcessor::new(&DEFAULT_SIGNATURES, ContentHasher::default());
    let outcomes: Vec<_> = files.iter().map(|p| processor.process(p)).collect();

    let records: usize = outcomes.iter().filter_map(|o| o.as_ref().ok()).map(Vec::len).sum();
    let errors = outcomes.iter().filter(|o| o.is_err()).count();
    assert_eq!(records, 1);
    assert_eq!(errors, 1);
}

/// Parallel hashing must not change results or their order
#[test]
fn test_parallel_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..30 {
        let path = temp_dir.path().join(format!("file_{:02}.bin", i));
        match i % 3 {
            0 => write_file(&path, &[0xFF, 0xD8, i as u8, 0x42]),
            1 => write_file(&path, format!("%PDF-1.{}", i).as_bytes()),
            _ => write_file(&path, b"GARBAGE"),
        }
    }

    let processor = FileProcessor::new(&DEFAULT_SIGNATURES, ContentHasher::default());
    let sequential = Scanner::new(processor).scan(temp_dir.path(), false).unwrap();
    let parallel = Scanner::new(processor)
        .with_jobs(4)
        .scan(temp_dir.path(), false)
        .unwrap();

    assert_eq!(sequential.records.len(), 20);
    assert_eq!(sequential.records, parallel.records);
    assert_eq!(
        render_csv(&sequential.records),
        render_csv(&parallel.records)
    );
}

/// Garbage and empty files are silently skipped
#[test]
fn test_unmatched_files_produce_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("empty"), b"");
    write_file(&temp_dir.path().join("garbage"), b"This is not a known format");
    write_file(&temp_dir.path().join("tiny"), &[0xFF]);

    let result = scan(temp_dir.path(), false).unwrap();
    assert!(result.records.is_empty());
    assert!(result.errors.is_empty());
    assert!(render_csv(&result.records).is_none());
}

/// The root vanishing is the only fatal condition
#[test]
fn test_missing_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("vanished");

    let err = scan(&root, true).unwrap_err();
    assert!(matches!(err, AnalyzerError::Enumerate { .. }));
}
