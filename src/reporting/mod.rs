//! Report and summary output

pub mod report_writer;
pub mod summary;

pub use report_writer::{render_csv, render_json, render_report, write_report, ReportFormat};
pub use summary::{format_duplicates, ScanSummary};
