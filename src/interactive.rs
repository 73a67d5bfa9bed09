//! Console prompts used when no directory is given on the command line

use dialoguer::{theme::Theme, Confirm, Input};
use std::path::{Path, PathBuf};

use crate::config::{validate_output, validate_root};
use crate::reporting::report_writer::ReportFormat;

/// Validator for the directory prompt
pub fn check_directory(input: &str) -> Result<(), String> {
    validate_root(Path::new(input.trim())).map_err(|e| e.to_string())
}

/// Validator for the output prompt
pub fn check_output(input: &str, format: ReportFormat) -> Result<(), String> {
    validate_output(Path::new(input.trim()), format).map_err(|e| e.to_string())
}

/// Ask until an existing directory is entered
pub fn ask_directory(theme: &dyn Theme) -> dialoguer::Result<PathBuf> {
    let answer = Input::<String>::with_theme(theme)
        .with_prompt("Path of the directory to be analyzed")
        .validate_with(|input: &String| check_directory(input))
        .interact_text()?;
    Ok(PathBuf::from(answer.trim()))
}

/// Ask until a usable output path is entered
///
/// # Returns
/// The path and whether the user agreed to replace an existing file
pub fn ask_output(theme: &dyn Theme, format: ReportFormat) -> dialoguer::Result<(PathBuf, bool)> {
    let prompt = format!(
        "Path for the output file (include file name and extension, i.e. /tmp/report.{})",
        format.extension()
    );

    loop {
        let answer = Input::<String>::with_theme(theme)
            .with_prompt(prompt.as_str())
            .validate_with(move |input: &String| check_output(input, format))
            .interact_text()?;
        let path = PathBuf::from(answer.trim());

        if !path.exists() {
            return Ok((path, false));
        }
        if confirm(theme, "Output file already exists. Do you want to replace it?", false)? {
            return Ok((path, true));
        }
    }
}

/// Yes/no question
pub fn confirm(theme: &dyn Theme, prompt: &str, default: bool) -> dialoguer::Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
}
