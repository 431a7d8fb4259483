//! Embedding record storage
//!
//! Provides the `EmbeddingStore` trait and backends for persisting the
//! embedding records produced at evaluation time. Each record pairs an
//! embedding with an optional class label and optional associated data,
//! keyed by the id returned from `add`.
//!
//! # Example
//!
//! ```
//! use simbench::store::{EmbeddingStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let id = store.add(vec![0.1, 0.2, 0.3], Some(7), None);
//! let record = store.get(id).unwrap();
//! assert_eq!(record.label, Some(7));
//! ```

pub mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record not found: {0}")]
    RecordNotFound(usize),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: String, got: String },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// One stored embedding with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Embedding predicted by the model
    pub embedding: Vec<f32>,

    /// Class numerical id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<i64>,

    /// Data associated with the embedding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl EmbeddingRecord {
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            label: None,
            data: None,
        }
    }

    pub fn with_label(mut self, label: i64) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Key-value store for embedding records
pub trait EmbeddingStore {
    /// Add an embedding record; returns the associated record id
    fn add(
        &mut self,
        embedding: Vec<f32>,
        label: Option<i64>,
        data: Option<serde_json::Value>,
    ) -> usize;

    /// Add a set of records; returns the associated record ids
    fn batch_add(&mut self, records: Vec<EmbeddingRecord>) -> Vec<usize>;

    /// Get a record by id
    fn get(&self, idx: usize) -> Result<&EmbeddingRecord>;

    /// Get a set of records by id
    fn batch_get(&self, idxs: &[usize]) -> Result<Vec<&EmbeddingRecord>>;

    /// Number of records in the store
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the store to disk
    fn save(&self, path: &Path) -> Result<()>;

    /// Load records from disk, replacing current contents; returns the
    /// number of records loaded
    fn load(&mut self, path: &Path) -> Result<usize>;

    /// Drop all records
    fn reset(&mut self);
}
