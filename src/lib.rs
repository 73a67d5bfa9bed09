//! File Signature Scanner Library
//!
//! Identifies files by their leading magic bytes, fingerprints every match
//! with a content hash, and renders a `Path;Type;Hash` report.

pub mod config;
pub mod core;
pub mod interactive;
pub mod reporting;
pub mod scanner;

pub use crate::core::{classifier, hasher, signature};
pub use crate::reporting::report_writer;
pub use crate::scanner::{file_processor, file_scanner};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{validate_output, validate_root, ScanConfig};
    pub use crate::core::classifier::classify;
    pub use crate::core::error::AnalyzerError;
    pub use crate::core::hasher::{format_hash, ContentHasher, HashAlgorithm, HashScope};
    pub use crate::core::signature::{Signature, SignatureRegistry, DEFAULT_SIGNATURES};
    pub use crate::interactive::{check_directory, check_output};
    pub use crate::reporting::report_writer::{
        render_csv, render_json, render_report, write_report, ReportFormat,
    };
    pub use crate::reporting::summary::{format_duplicates, ScanSummary};
    pub use crate::scanner::duplicate_detector::{find_duplicates, DuplicateInfo};
    pub use crate::scanner::file_processor::{FileProcessor, FileRecord, ScanError};
    pub use crate::scanner::file_scanner::{collect_files, scan, ScanResult, Scanner};
}
