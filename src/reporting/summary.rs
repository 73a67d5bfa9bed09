//! End-of-scan summary shown to the user

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::scanner::duplicate_detector::DuplicateInfo;
use crate::scanner::file_scanner::ScanResult;

/// Counts and diagnostics for one finished scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub directory: String,
    pub files_scanned: usize,
    /// Files that produced at least one record
    pub files_matched: usize,
    pub records: usize,
    pub errors: Vec<String>,
}

impl ScanSummary {
    pub fn from_result(directory: &Path, result: &ScanResult) -> Self {
        Self {
            directory: directory.display().to_string(),
            files_scanned: result.files_scanned,
            files_matched: result.matched_file_count(),
            records: result.records.len(),
            errors: result.errors.iter().map(|e| e.message.clone()).collect(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Directory {} has been analyzed and {} files have been found.",
            self.directory, self.files_matched
        )?;
        if self.has_errors() {
            writeln!(f, "Error(s) occurred, please check below:")?;
            for error in &self.errors {
                writeln!(f, "{}", error)?;
            }
        }
        Ok(())
    }
}

/// Render duplicate groups for the console
pub fn format_duplicates(duplicates: &[DuplicateInfo]) -> String {
    if duplicates.is_empty() {
        return "No duplicate files found.\n".to_string();
    }

    let mut out = format!("Found {} group(s) of duplicate files:\n", duplicates.len());
    for (idx, dup) in duplicates.iter().enumerate() {
        out.push_str(&format!("  Group {} (Hash: {}):\n", idx + 1, dup.hash));
        for path in &dup.paths {
            out.push_str(&format!("    {}\n", path));
        }
    }
    out
}
