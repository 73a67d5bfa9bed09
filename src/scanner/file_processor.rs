//! Per-file pipeline: open, read prefix, classify, hash

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::core::classifier::classify;
use crate::core::hasher::ContentHasher;
use crate::core::signature::{SignatureRegistry, DEFAULT_SIGNATURES};

/// One (file, matched signature) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileRecord {
    pub path: String,
    #[serde(rename = "Type")]
    pub file_type: String,
    pub hash: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, file_type: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_type: file_type.into(),
            hash: hash.into(),
        }
    }
}

/// A file that could not be fully processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub message: String,
    pub path: Option<String>,
}

impl ScanError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn for_path(path: &Path, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.to_string_lossy().into_owned()),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classifies and fingerprints individual files
#[derive(Debug, Clone, Copy)]
pub struct FileProcessor<'a> {
    registry: &'a SignatureRegistry,
    hasher: ContentHasher,
    prefix_len: usize,
    hash_offset: u64,
}

impl<'a> FileProcessor<'a> {
    pub fn new(registry: &'a SignatureRegistry, hasher: ContentHasher) -> Self {
        Self {
            registry,
            hasher,
            prefix_len: registry.max_prefix_len(),
            // Pinned to the built-in signatures so extra ones never move it
            hash_offset: DEFAULT_SIGNATURES.max_prefix_len() as u64,
        }
    }

    pub fn hasher(&self) -> ContentHasher {
        self.hasher
    }

    /// Process a single file
    ///
    /// # Returns
    /// One record per matched signature (all sharing one hash), an empty
    /// vector when nothing matched, or a `ScanError` when the file could not
    /// be opened or read.
    pub fn process(&self, path: &Path) -> Result<Vec<FileRecord>, ScanError> {
        let mut file = File::open(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot open file");
            ScanError::for_path(path, format!("Failed to open {}: {}", path.display(), e))
        })?;

        // `file` is dropped on every return below
        self.process_stream(path, &mut file).map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot read file");
            ScanError::for_path(path, format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn process_stream(&self, path: &Path, file: &mut File) -> io::Result<Vec<FileRecord>> {
        let prefix = read_prefix(file, self.prefix_len)?;
        let matched = classify(self.registry, &prefix);

        if matched.is_empty() {
            debug!(path = %path.display(), "no signature matched");
            return Ok(Vec::new());
        }

        let hash = self.hasher.hash_stream(&mut *file, self.hash_offset)?;
        let display_path = path.to_string_lossy();

        debug!(path = %display_path, types = ?matched, %hash, "matched");

        Ok(matched
            .into_iter()
            .map(|file_type| FileRecord::new(&*display_path, file_type, hash.as_str()))
            .collect())
    }
}

/// Read up to `len` bytes, fewer only at end of file
fn read_prefix<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(len);
    reader.take(len as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}
