//! In-memory embedding store
//!
//! Backs the `EmbeddingStore` trait with a `Vec`, with JSON persistence.
//! Saved snapshots carry a manifest with a SHA-256 checksum of the record
//! payload, verified on load.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{EmbeddingRecord, EmbeddingStore, Result, StoreError};

/// Snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreManifest {
    version: u32,
    num_records: usize,
    sha256: String,
    saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    manifest: StoreManifest,
    records: Vec<EmbeddingRecord>,
}

/// In-memory embedding record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<EmbeddingRecord>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn checksum(records: &[EmbeddingRecord]) -> Result<String> {
        let payload = serde_json::to_vec(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        Ok(format!("sha256-{:x}", hasher.finalize()))
    }
}

impl EmbeddingStore for MemoryStore {
    fn add(
        &mut self,
        embedding: Vec<f32>,
        label: Option<i64>,
        data: Option<serde_json::Value>,
    ) -> usize {
        self.records.push(EmbeddingRecord {
            embedding,
            label,
            data,
        });
        self.records.len() - 1
    }

    fn batch_add(&mut self, records: Vec<EmbeddingRecord>) -> Vec<usize> {
        let start = self.records.len();
        self.records.extend(records);
        (start..self.records.len()).collect()
    }

    fn get(&self, idx: usize) -> Result<&EmbeddingRecord> {
        self.records.get(idx).ok_or(StoreError::RecordNotFound(idx))
    }

    fn batch_get(&self, idxs: &[usize]) -> Result<Vec<&EmbeddingRecord>> {
        idxs.iter().map(|&idx| self.get(idx)).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn save(&self, path: &Path) -> Result<()> {
        let snapshot = StoreSnapshot {
            manifest: StoreManifest {
                version: SNAPSHOT_VERSION,
                num_records: self.records.len(),
                sha256: Self::checksum(&self.records)?,
                saved_at: Utc::now(),
            },
            records: self.records.clone(),
        };

        let content = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let got = Self::checksum(&snapshot.records)?;
        if got != snapshot.manifest.sha256 {
            return Err(StoreError::ChecksumMismatch {
                expected: snapshot.manifest.sha256,
                got,
            });
        }

        self.records = snapshot.records;
        Ok(self.records.len())
    }

    fn reset(&mut self) {
        self.records.clear();
    }
}
