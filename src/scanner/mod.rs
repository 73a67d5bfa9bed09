//! File scanning, per-file processing and duplicate grouping

pub mod duplicate_detector;
pub mod file_processor;
pub mod file_scanner;

pub use duplicate_detector::{find_duplicates, DuplicateInfo};
pub use file_processor::{FileProcessor, FileRecord, ScanError};
pub use file_scanner::{collect_files, scan, ScanResult, Scanner};
