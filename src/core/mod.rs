//! Signature matching and hashing primitives

pub mod classifier;
pub mod error;
pub mod hasher;
pub mod signature;

pub use classifier::classify;
pub use error::{AnalyzerError, Result};
pub use hasher::{format_hash, ContentHasher, HashAlgorithm, HashScope};
pub use signature::{Signature, SignatureRegistry, DEFAULT_SIGNATURES};
