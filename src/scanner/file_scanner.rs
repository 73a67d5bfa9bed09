//! Directory enumeration and scan orchestration

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::file_processor::{FileProcessor, FileRecord, ScanError};
use crate::core::error::{AnalyzerError, Result};
use crate::core::hasher::ContentHasher;
use crate::core::signature::DEFAULT_SIGNATURES;

/// Everything produced by one directory scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub records: Vec<FileRecord>,
    pub errors: Vec<ScanError>,
    /// Number of candidate files handed to the processor
    pub files_scanned: usize,
    /// Files that produced at least one record, counted per processed file
    /// since lossy path strings of distinct files may coincide
    pub files_matched: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that produced at least one record
    pub fn matched_file_count(&self) -> usize {
        self.files_matched
    }

    fn absorb(&mut self, outcome: std::result::Result<Vec<FileRecord>, ScanError>) {
        self.files_scanned += 1;
        match outcome {
            Ok(records) => {
                if !records.is_empty() {
                    self.files_matched += 1;
                }
                self.records.extend(records);
            }
            Err(error) => self.errors.push(error),
        }
    }
}

/// Collect candidate files under `dir`
///
/// # Arguments
/// * `dir` - Directory to enumerate
/// * `recursive` - Whether to descend into subdirectories
///
/// # Returns
/// Candidate paths in enumeration order, plus diagnostics for nested
/// directories that could not be read. Failing to read `dir` itself is an
/// error.
pub fn collect_files(dir: &Path, recursive: bool) -> Result<(Vec<PathBuf>, Vec<ScanError>)> {
    let enumerate_err = |source: io::Error| AnalyzerError::Enumerate {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(enumerate_err)?;
    if !metadata.is_dir() {
        return Err(enumerate_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }

    let mut files = Vec::new();
    let mut errors = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(enumerate_err(io::Error::from(e))),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    let message = format!("Failed to enumerate: {}", e);
                    errors.push(match e.path() {
                        Some(path) => ScanError::for_path(path, message),
                        None => ScanError::new(message),
                    });
                    continue;
                }
            };
            if is_candidate(entry.path(), entry.file_type()) {
                files.push(entry.into_path());
            }
        }
    } else {
        for entry in fs::read_dir(dir).map_err(enumerate_err)? {
            let entry = entry.map_err(enumerate_err)?;
            let path = entry.path();
            match entry.file_type() {
                Ok(file_type) if !is_candidate(&path, file_type) => {}
                // An unknown file type is left to the processor to report
                _ => files.push(path),
            }
        }
    }

    Ok((files, errors))
}

/// Non-directories are candidates; symlinks are resolved only to exclude
/// links to directories, so dangling links are still attempted.
fn is_candidate(path: &Path, file_type: FileType) -> bool {
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        return fs::metadata(path).map(|m| !m.is_dir()).unwrap_or(true);
    }
    true
}

/// Drives a [`FileProcessor`] over a directory
pub struct Scanner<'a> {
    processor: FileProcessor<'a>,
    jobs: usize,
    progress: ProgressBar,
}

impl<'a> Scanner<'a> {
    pub fn new(processor: FileProcessor<'a>) -> Self {
        Self {
            processor,
            jobs: 1,
            progress: ProgressBar::hidden(),
        }
    }

    /// Hash files on `jobs` worker threads. Output order is unchanged.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Scan `root`, recursing into subdirectories when asked
    pub fn scan(&self, root: &Path, include_subdirectories: bool) -> Result<ScanResult> {
        let (files, enumeration_errors) = collect_files(root, include_subdirectories)?;

        info!(
            root = %root.display(),
            recursive = include_subdirectories,
            files = files.len(),
            jobs = self.jobs,
            "scanning"
        );

        self.progress.set_length(files.len() as u64);
        let outcomes = self.process_all(&files)?;
        self.progress.finish_and_clear();

        let mut result = ScanResult::new();
        result.errors.extend(enumeration_errors);
        for outcome in outcomes {
            result.absorb(outcome);
        }

        info!(
            files_scanned = result.files_scanned,
            records = result.records.len(),
            errors = result.errors.len(),
            "scan complete"
        );

        Ok(result)
    }

    fn process_all(
        &self,
        files: &[PathBuf],
    ) -> Result<Vec<std::result::Result<Vec<FileRecord>, ScanError>>> {
        let processor = self.processor;

        if self.jobs <= 1 {
            return Ok(files
                .iter()
                .progress_with(self.progress.clone())
                .map(|path| processor.process(path))
                .collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| AnalyzerError::InvalidConfig(format!("thread pool: {}", e)))?;

        // Indexed collect keeps enumeration order
        Ok(pool.install(|| {
            files
                .par_iter()
                .progress_with(self.progress.clone())
                .map(|path| processor.process(path))
                .collect()
        }))
    }
}

/// Scan with the built-in signatures and default hashing
pub fn scan(root: &Path, include_subdirectories: bool) -> Result<ScanResult> {
    let processor = FileProcessor::new(&DEFAULT_SIGNATURES, ContentHasher::default());
    Scanner::new(processor).scan(root, include_subdirectories)
}
