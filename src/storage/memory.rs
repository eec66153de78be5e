//! In-memory brute-force vector index.

use super::{Metadata, Neighbor, VectorIndex};
use crate::embedding::cosine_similarity;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A stored vector with its document and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: String,
    vector: Vec<f32>,
    document: String,
    metadata: Metadata,
}

#[derive(Debug, Default)]
struct IndexState {
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
}

impl IndexState {
    fn upsert(&mut self, entry: IndexEntry) {
        if let Some(&pos) = self.positions.get(&entry.id) {
            self.entries[pos] = entry;
        } else {
            self.positions.insert(entry.id.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    fn from_entries(entries: Vec<IndexEntry>) -> Self {
        let mut state = Self::default();
        for entry in entries {
            state.upsert(entry);
        }
        state
    }
}

/// Index file contents.
#[derive(Serialize, Deserialize)]
struct IndexData {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

/// Brute-force O(n) cosine index.
///
/// Ties in similarity keep insertion order.
#[derive(Debug)]
pub struct MemoryVectorIndex {
    dimensions: usize,
    path: Option<PathBuf>,
    state: RwLock<IndexState>,
}

impl MemoryVectorIndex {
    /// Creates an empty in-memory index.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            path: None,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Opens an index backed by a JSON file, loading it if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// was written with different dimensions.
    pub fn open(path: impl Into<PathBuf>, dimensions: usize) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| Error::OperationFailed {
                operation: "load_index".to_string(),
                cause: e.to_string(),
            })?;
            let data: IndexData =
                serde_json::from_str(&content).map_err(|e| Error::OperationFailed {
                    operation: "parse_index".to_string(),
                    cause: e.to_string(),
                })?;
            if data.dimensions != dimensions {
                return Err(Error::InvalidInput(format!(
                    "Index dimensions mismatch: expected {dimensions}, got {}",
                    data.dimensions
                )));
            }
            IndexState::from_entries(data.entries)
        } else {
            IndexState::default()
        };

        Ok(Self {
            dimensions,
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the index to its backing file. A no-op for in-memory indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        let data = IndexData {
            dimensions: self.dimensions,
            entries: self.read()?.entries.clone(),
        };
        let content = serde_json::to_string(&data).map_err(|e| Error::OperationFailed {
            operation: "serialize_index".to_string(),
            cause: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_index_dir".to_string(),
                cause: e.to_string(),
            })?;
        }
        fs::write(path, content).map_err(|e| Error::OperationFailed {
            operation: "write_index".to_string(),
            cause: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), entries = data.entries.len(), "Saved vector index");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexState>> {
        self.state.read().map_err(|e| Error::OperationFailed {
            operation: "lock_index".to_string(),
            cause: e.to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexState>> {
        self.state.write().map_err(|e| Error::OperationFailed {
            operation: "lock_index".to_string(),
            cause: e.to_string(),
        })
    }

    fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::InvalidInput(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }
        Ok(())
    }
}

impl VectorIndex for MemoryVectorIndex {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn add_batch(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        documents: &[String],
        metadata: &[Metadata],
    ) -> Result<()> {
        let len = ids.len();
        if vectors.len() != len || documents.len() != len || metadata.len() != len {
            return Err(Error::InvalidInput(format!(
                "Batch length mismatch: {len} ids, {} vectors, {} documents, {} metadata",
                vectors.len(),
                documents.len(),
                metadata.len()
            )));
        }
        for vector in vectors {
            self.validate(vector)?;
        }

        let mut state = self.write()?;
        for (((id, vector), document), metadata) in
            ids.iter().zip(vectors).zip(documents).zip(metadata)
        {
            state.upsert(IndexEntry {
                id: id.clone(),
                vector: vector.clone(),
                document: document.clone(),
                metadata: metadata.clone(),
            });
        }
        Ok(())
    }

    fn query_nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.validate(vector)?;
        let state = self.read()?;

        let mut scored: Vec<(usize, f32)> = state
            .entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (pos, cosine_similarity(vector, &entry.vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(pos, similarity)| {
                let entry = &state.entries[pos];
                Neighbor {
                    id: entry.id.clone(),
                    document: entry.document.clone(),
                    metadata: entry.metadata.clone(),
                    similarity,
                }
            })
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.entries.len())
    }

    fn clear(&self) -> Result<()> {
        *self.write()? = IndexState::default();
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.save()
    }
}
