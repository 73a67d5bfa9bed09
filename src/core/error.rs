//! Error types shared by the scanning pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan or reject a configuration.
///
/// Per-file failures are not represented here; they become
/// [`ScanError`](crate::scanner::ScanError) values and the scan continues.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Cannot enumerate directory {path:?}: {source}")]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Signature {type_name} with prefix {prefix} is already registered")]
    DuplicateSignature { type_name: String, prefix: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write report {path:?}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
