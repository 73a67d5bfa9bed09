//! Content hashing for matched files
//!
//! Digests are streamed in fixed-size chunks and rendered as uppercase hex
//! byte pairs separated by `-` (e.g. `90-01-50-98-...`).

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

const CHUNK_SIZE: usize = 8192;

/// Digest used to fingerprint file content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5: fast fingerprint, not collision resistant
    #[default]
    Md5,
    /// SHA-256
    Sha256,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Which bytes of a matched file are hashed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HashScope {
    /// Everything after the prefix bytes read for classification
    #[default]
    AfterPrefix,
    /// The complete file from offset 0
    WholeFile,
}

/// Hashes readers with a fixed algorithm and scope
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHasher {
    algorithm: HashAlgorithm,
    scope: HashScope,
}

impl ContentHasher {
    pub fn new(algorithm: HashAlgorithm, scope: HashScope) -> Self {
        Self { algorithm, scope }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn scope(&self) -> HashScope {
        self.scope
    }

    /// Hash the remaining bytes of `reader` from its current position
    pub fn hash_remaining<R: Read>(&self, reader: R) -> io::Result<String> {
        let digest = match self.algorithm {
            HashAlgorithm::Md5 => digest_stream::<Md5, _>(reader)?,
            HashAlgorithm::Sha256 => digest_stream::<Sha256, _>(reader)?,
        };
        Ok(format_hash(&digest))
    }

    /// Hash a seekable stream, starting at `prefix_offset` or at 0 for `WholeFile`
    ///
    /// An offset past the end of the stream hashes zero bytes.
    pub fn hash_stream<R: Read + Seek>(&self, mut reader: R, prefix_offset: u64) -> io::Result<String> {
        let start = match self.scope {
            HashScope::AfterPrefix => prefix_offset,
            HashScope::WholeFile => 0,
        };
        reader.seek(SeekFrom::Start(start))?;
        self.hash_remaining(reader)
    }
}

fn digest_stream<D: Digest, R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_vec())
}

/// Render digest bytes as `AA-BB-CC`
pub fn format_hash(digest: &[u8]) -> String {
    digest
        .iter()
        .map(|byte| hex::encode_upper([*byte]))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_format_hash() {
        assert_eq!(format_hash(&[0x3F, 0x2A, 0x91]), "3F-2A-91");
        assert_eq!(format_hash(&[0x00, 0x0a]), "00-0A");
        assert_eq!(format_hash(&[]), "");
    }

    #[test]
    fn test_md5_known_value() {
        let hasher = ContentHasher::new(HashAlgorithm::Md5, HashScope::AfterPrefix);
        let hash = hasher.hash_remaining(Cursor::new(b"abc")).unwrap();
        assert_eq!(hash, "90-01-50-98-3C-D2-4F-B0-D6-96-3F-7D-28-E1-7F-72");
    }

    #[test]
    fn test_md5_of_empty_stream() {
        let hasher = ContentHasher::default();
        let hash = hasher.hash_remaining(Cursor::new(Vec::new())).unwrap();
        assert_eq!(hash, "D4-1D-8C-D9-8F-00-B2-04-E9-80-09-98-EC-F8-42-7E");
    }

    #[test]
    fn test_sha256_known_value() {
        let hasher = ContentHasher::new(HashAlgorithm::Sha256, HashScope::AfterPrefix);
        let hash = hasher.hash_remaining(Cursor::new(b"test content")).unwrap();
        assert_eq!(
            hash.replace('-', "").to_lowercase(),
            "6ae8a75555209fd6c44157c0aed8016e763ff435a19cf186f76863140143ff72"
        );
    }

    #[test]
    fn test_scope_controls_starting_offset() {
        let mut data = b"%PDF".to_vec();
        data.extend_from_slice(b"abc");

        // Current position is irrelevant, the offset decides
        let mut cursor = Cursor::new(data.clone());
        cursor.set_position(6);
        let after = ContentHasher::new(HashAlgorithm::Md5, HashScope::AfterPrefix)
            .hash_stream(cursor, 4)
            .unwrap();
        assert_eq!(after, "90-01-50-98-3C-D2-4F-B0-D6-96-3F-7D-28-E1-7F-72");

        let mut cursor = Cursor::new(data.clone());
        cursor.set_position(4);
        let whole = ContentHasher::new(HashAlgorithm::Md5, HashScope::WholeFile)
            .hash_stream(cursor, 4)
            .unwrap();
        let expected = ContentHasher::default()
            .hash_remaining(Cursor::new(data))
            .unwrap();
        assert_eq!(whole, expected);
        assert_ne!(whole, after);
    }

    #[test]
    fn test_offset_past_end_hashes_nothing() {
        let hash = ContentHasher::default()
            .hash_stream(Cursor::new(vec![0xFFu8, 0xD8]), 4)
            .unwrap();
        assert_eq!(hash, "D4-1D-8C-D9-8F-00-B2-04-E9-80-09-98-EC-F8-42-7E");
    }

    #[test]
    fn test_large_stream_spans_chunks() {
        let data = vec![0x5Au8; CHUNK_SIZE * 3 + 17];
        let hasher = ContentHasher::new(HashAlgorithm::Sha256, HashScope::AfterPrefix);
        let a = hasher.hash_remaining(Cursor::new(data.clone())).unwrap();
        let b = hasher.hash_remaining(Cursor::new(data)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.split('-').count(), 32);
    }
}
