//! Integration tests for near-miss and truncated headers

use signature_scan_rs::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to create a test file with given content
fn create_test_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn types_of(content: &[u8]) -> Vec<String> {
    let temp_file = create_test_file(content);
    let processor = FileProcessor::new(&DEFAULT_SIGNATURES, ContentHasher::default());
    processor
        .process(temp_file.path())
        .unwrap()
        .into_iter()
        .map(|r| r.file_type)
        .collect()
}

#[test]
fn test_corrupted_pdf_headers() {
    let test_cases = vec![
        b"PDF-1.7\n%%EOF".as_slice(),  // Missing %
        b"$PDF-1.7\n%%EOF".as_slice(), // Wrong character
        b"%%PDF-1.7".as_slice(),       // Extra %
        b"%pdf-1.7".as_slice(),        // Lowercase
        b" %PDF-1.7".as_slice(),       // Leading space
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        assert!(types_of(content).is_empty(), "Test case {} should not match", idx);
    }
}

#[test]
fn test_corrupted_jpg_headers() {
    let test_cases = vec![
        [0xD8u8, 0xFF, 0xE0, 0x00], // Swapped
        [0xFF, 0xD9, 0xFF, 0xE0], // End-of-image marker
        [0x00, 0xFF, 0xD8, 0xFF], // Offset by one
        [0xFE, 0xD8, 0xFF, 0xE0],
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        assert!(types_of(content).is_empty(), "Test case {} should not match", idx);
    }
}

#[test]
fn test_files_below_prefix_length() {
    let test_cases = vec![
        b"".as_slice(),
        b"%".as_slice(),
        b"%P".as_slice(),
        b"%PD".as_slice(),
        [0xFFu8].as_slice(),
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        assert!(types_of(content).is_empty(), "Test case {} should not match", idx);
    }
}

#[test]
fn test_exact_length_files_match() {
    assert_eq!(types_of(b"%PDF"), vec!["PDF"]);
    assert_eq!(types_of(&[0xFF, 0xD8]), vec!["JPG"]);
    assert_eq!(types_of(&[0xFF, 0xD8, 0x00]), vec!["JPG"]);
}

#[test]
fn test_binary_noise_never_panics() {
    for seed in 0u32..64 {
        let content: Vec<u8> = (0..seed)
            .map(|i| (i.wrapping_mul(2654435761).wrapping_add(seed) >> 3) as u8)
            .collect();
        let _ = types_of(&content);
    }
}
