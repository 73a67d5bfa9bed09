//! Duplicate detection over matched records

use serde::Serialize;
use std::collections::HashMap;

use super::file_processor::FileRecord;

/// Files sharing one content hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateInfo {
    pub hash: String,
    pub paths: Vec<String>,
}

/// Group records by hash
///
/// # Arguments
/// * `records` - Scan records, in report order
///
/// # Returns
/// Groups of two or more distinct paths with identical hashes, ordered by
/// the first appearance of each hash. A file matching several signatures
/// counts once.
pub fn find_duplicates(records: &[FileRecord]) -> Vec<DuplicateInfo> {
    let mut order: Vec<&str> = Vec::new();
    let mut hash_map: HashMap<&str, Vec<&str>> = HashMap::new();

    for record in records {
        let paths = hash_map.entry(record.hash.as_str()).or_insert_with(|| {
            order.push(record.hash.as_str());
            Vec::new()
        });
        if !paths.contains(&record.path.as_str()) {
            paths.push(record.path.as_str());
        }
    }

    order
        .into_iter()
        .filter_map(|hash| {
            let paths = hash_map.remove(hash)?;
            (paths.len() > 1).then(|| DuplicateInfo {
                hash: hash.to_string(),
                paths: paths.into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}
