//! Scan configuration and the validation applied before a scan starts

use std::path::{Path, PathBuf};

use crate::core::error::{AnalyzerError, Result};
use crate::core::hasher::{ContentHasher, HashAlgorithm, HashScope};
use crate::core::signature::{Signature, SignatureRegistry};
use crate::reporting::report_writer::ReportFormat;

/// Everything needed to run one scan and persist its report
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub recursive: bool,
    pub output: PathBuf,
    pub algorithm: HashAlgorithm,
    pub hash_scope: HashScope,
    pub format: ReportFormat,
    pub jobs: usize,
    /// Replace an existing output file
    pub force: bool,
    pub show_progress: bool,
    pub detect_duplicates: bool,
    /// Signatures registered after the built-in ones
    pub extra_signatures: Vec<Signature>,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            output: output.into(),
            algorithm: HashAlgorithm::default(),
            hash_scope: HashScope::default(),
            format: ReportFormat::default(),
            jobs: 1,
            force: false,
            show_progress: false,
            detect_duplicates: false,
            extra_signatures: Vec::new(),
        }
    }

    /// Check paths and overwrite policy
    pub fn validate(&self) -> Result<()> {
        validate_root(&self.root)?;
        validate_output(&self.output, self.format)?;

        if self.output.exists() && !self.force {
            return Err(AnalyzerError::InvalidConfig(format!(
                "output file {} already exists (use --force to replace it)",
                self.output.display()
            )));
        }
        if self.jobs == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Built-in signatures followed by `extra_signatures`
    pub fn registry(&self) -> Result<SignatureRegistry> {
        let mut registry = SignatureRegistry::with_defaults();
        for signature in &self.extra_signatures {
            registry.register(signature.clone())?;
        }
        Ok(registry)
    }

    pub fn hasher(&self) -> ContentHasher {
        ContentHasher::new(self.algorithm, self.hash_scope)
    }
}

/// The scan root must be an existing directory
pub fn validate_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(AnalyzerError::InvalidConfig(format!(
            "directory {} is invalid",
            root.display()
        )))
    }
}

/// The output needs a file name, the format's extension and an existing parent
pub fn validate_output(output: &Path, format: ReportFormat) -> Result<()> {
    let invalid = |reason: &str| {
        AnalyzerError::InvalidConfig(format!(
            "output path {} is invalid: {}",
            output.display(),
            reason
        ))
    };

    let has_name = output
        .file_name()
        .is_some_and(|name| !name.to_string_lossy().trim().is_empty());
    if !has_name {
        return Err(invalid("missing file name"));
    }

    let extension_ok = output
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(format.extension()));
    if !extension_ok {
        return Err(invalid(&format!("expected a .{} file", format.extension())));
    }

    if output.is_dir() {
        return Err(invalid("is a directory"));
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(invalid("parent directory does not exist"));
    }

    Ok(())
}
