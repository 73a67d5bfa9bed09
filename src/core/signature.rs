//! Signature registry: the magic numbers recognised by the scanner

use std::fmt;

use super::error::{AnalyzerError, Result};

lazy_static::lazy_static! {
    /// Built-in registry: `JPG` then `PDF`.
    pub static ref DEFAULT_SIGNATURES: SignatureRegistry = SignatureRegistry::with_defaults();
}

/// A named byte prefix identifying a file format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    type_name: String,
    prefix: Vec<u8>,
}

impl Signature {
    /// Create a signature, rejecting empty names and empty prefixes
    pub fn new(type_name: impl Into<String>, prefix: Vec<u8>) -> Result<Self> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(AnalyzerError::InvalidSignature(
                "type name must not be empty".to_string(),
            ));
        }
        if prefix.is_empty() {
            return Err(AnalyzerError::InvalidSignature(format!(
                "{} has an empty prefix",
                type_name
            )));
        }
        Ok(Self { type_name, prefix })
    }

    /// Parse a `NAME=HEX` definition such as `PNG=89504E47`
    ///
    /// Whitespace, `-` and `:` separators inside the hex part are ignored,
    /// so `PNG=89-50-4E-47` and `PNG=89:50:4e:47` are accepted too.
    pub fn parse(definition: &str) -> Result<Self> {
        let (name, hex_part) = definition.split_once('=').ok_or_else(|| {
            AnalyzerError::InvalidSignature(format!(
                "expected NAME=HEX, got {:?}",
                definition
            ))
        })?;

        let digits: String = hex_part
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != ':')
            .collect();
        let prefix = hex::decode(&digits).map_err(|e| {
            AnalyzerError::InvalidSignature(format!("{}: {}", definition, e))
        })?;

        Self::new(name.trim(), prefix)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Exact comparison against the leading bytes of `buffer`.
    /// A buffer shorter than the prefix never matches.
    pub fn matches(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&self.prefix)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.type_name, hex::encode_upper(&self.prefix))
    }
}

/// Ordered, append-only collection of signatures
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    signatures: Vec<Signature>,
}

impl SignatureRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in signatures
    pub fn with_defaults() -> Self {
        Self {
            signatures: vec![
                Signature {
                    type_name: "JPG".to_string(),
                    prefix: vec![0xFF, 0xD8],
                },
                Signature {
                    type_name: "PDF".to_string(),
                    prefix: vec![0x25, 0x50, 0x44, 0x46],
                },
            ],
        }
    }

    /// Append a signature. An identical (name, prefix) pair is rejected.
    pub fn register(&mut self, signature: Signature) -> Result<()> {
        if self.signatures.contains(&signature) {
            return Err(AnalyzerError::DuplicateSignature {
                type_name: signature.type_name,
                prefix: hex::encode_upper(&signature.prefix),
            });
        }
        self.signatures.push(signature);
        Ok(())
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Number of leading bytes needed to test every signature
    pub fn max_prefix_len(&self) -> usize {
        self.signatures
            .iter()
            .map(|s| s.prefix.len())
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
