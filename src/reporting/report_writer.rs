//! Report writing functionality
//!
//! The tabular report is semicolon-delimited UTF-8 text:
//!
//! ```text
//! Path;Type;Hash
//! /photos/a.jpg;JPG;AA-BB-...
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::error::{AnalyzerError, Result};
use crate::scanner::file_processor::FileRecord;

/// Field delimiter of the tabular report
pub const DELIMITER: char = ';';

/// Column names, in output order
pub const HEADER: [&str; 3] = ["Path", "Type", "Hash"];

/// Output encoding of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Semicolon-delimited table
    #[default]
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl ReportFormat {
    /// File extension expected for the output path
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Quote a field only when it would otherwise break the row
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row(out: &mut String, fields: [&str; 3]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Render records as the delimited table
///
/// # Returns
/// `None` when there is nothing to write
pub fn render_csv(records: &[FileRecord]) -> Option<Vec<u8>> {
    if records.is_empty() {
        return None;
    }

    let mut out = String::new();
    push_row(&mut out, HEADER);
    for record in records {
        push_row(
            &mut out,
            [record.path.as_str(), record.file_type.as_str(), record.hash.as_str()],
        );
    }
    Some(out.into_bytes())
}

/// Render records as a JSON array, `None` when empty
pub fn render_json(records: &[FileRecord]) -> Result<Option<Vec<u8>>> {
    if records.is_empty() {
        return Ok(None);
    }
    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');
    Ok(Some(bytes))
}

/// Render records in the requested format
pub fn render_report(records: &[FileRecord], format: ReportFormat) -> Result<Option<Vec<u8>>> {
    match format {
        ReportFormat::Csv => Ok(render_csv(records)),
        ReportFormat::Json => render_json(records),
    }
}

/// Write the report to `output_path`, replacing any existing file
///
/// # Arguments
/// * `output_path` - Destination file
/// * `records` - Records in scan order
/// * `format` - Output encoding
///
/// # Returns
/// `false` if there were no records and no file was created
pub fn write_report(output_path: &Path, records: &[FileRecord], format: ReportFormat) -> Result<bool> {
    let Some(content) = render_report(records, format)? else {
        return Ok(false);
    };

    fs::write(output_path, content).map_err(|source| AnalyzerError::ReportWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(path = %output_path.display(), records = records.len(), %format, "report written");
    Ok(true)
}
