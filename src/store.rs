//! Record index for the scrip store.
//!
//! This module provides:
//! - Record index: enumerate buckets and map prescription IDs to file paths
//! - Prescription ID validation and generation

use crate::context::{Bucket, StoreContext};
use crate::error::{Result, ScripError};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Regex pattern for valid prescription IDs.
static RX_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RX-\d{3,}$").expect("Invalid prescription ID regex"));

/// Information about a record in the store.
#[derive(Debug, Clone)]
pub struct RxInfo {
    /// The prescription ID (e.g., "RX-001").
    pub id: String,

    /// The bucket the record is in.
    pub bucket: Bucket,

    /// The full path to the record file.
    pub path: PathBuf,

    /// The numeric part of the prescription ID.
    pub number: u32,
}

/// Index of all records in the store.
#[derive(Debug, Default)]
pub struct RxIndex {
    /// Map of prescription ID to record info.
    records: HashMap<String, RxInfo>,

    /// Maximum record number seen (for generating new IDs).
    max_number: u32,
}

impl RxIndex {
    /// Build a record index by scanning all buckets.
    ///
    /// Scans bucket directories for record files named `RX-{number}.md`.
    /// Files that do not match the naming pattern are ignored (the `audit`
    /// command reports them).
    pub fn build(ctx: &StoreContext) -> Result<Self> {
        let mut index = RxIndex::default();

        for &bucket in Bucket::all() {
            let bucket_path = ctx.bucket_path(bucket);
            if !bucket_path.exists() {
                continue;
            }

            let entries = fs::read_dir(&bucket_path).map_err(|e| {
                ScripError::StoreError(format!(
                    "failed to read bucket directory '{}': {}",
                    bucket_path.display(),
                    e
                ))
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| {
                    ScripError::StoreError(format!("failed to read directory entry: {}", e))
                })?;
                let path = entry.path();

                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }

                if let Some(id) = extract_rx_id_from_filename(&path)
                    && let Some(number) = extract_rx_number(&id)
                {
                    if number > index.max_number {
                        index.max_number = number;
                    }
                    index.records.insert(
                        id.clone(),
                        RxInfo {
                            id,
                            bucket,
                            path,
                            number,
                        },
                    );
                }
            }
        }

        Ok(index)
    }

    /// Find a record by ID.
    pub fn find(&self, id: &str) -> Option<&RxInfo> {
        self.records.get(id)
    }

    /// All records in a given bucket, sorted by number.
    pub fn in_bucket(&self, bucket: Bucket) -> Vec<&RxInfo> {
        let mut records: Vec<_> = self
            .records
            .values()
            .filter(|info| info.bucket == bucket)
            .collect();
        records.sort_by_key(|info| info.number);
        records
    }

    /// Count of records in a given bucket.
    pub fn count(&self, bucket: Bucket) -> usize {
        self.records
            .values()
            .filter(|info| info.bucket == bucket)
            .count()
    }

    /// Generate the next free prescription ID (e.g., "RX-004").
    pub fn next_id(&self) -> String {
        format!("RX-{:03}", self.max_number + 1)
    }

    /// Iterate over all indexed records.
    pub fn iter(&self) -> impl Iterator<Item = &RxInfo> {
        self.records.values()
    }
}

/// Check whether a string is a valid prescription ID.
pub fn is_valid_rx_id(id: &str) -> bool {
    RX_ID_REGEX.is_match(id)
}

/// Extract the prescription ID from a record filename (`RX-001.md` -> `RX-001`).
fn extract_rx_id_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if is_valid_rx_id(stem) {
        Some(stem.to_string())
    } else {
        None
    }
}

/// Extract the numeric part of a prescription ID.
fn extract_rx_number(id: &str) -> Option<u32> {
    id.strip_prefix("RX-")?.parse().ok()
}
