//! Vector index storage.
//!
//! The recommender treats the index as an external collaborator reached
//! through [`VectorIndex`]. [`MemoryVectorIndex`] is a brute-force cosine
//! index with optional JSON persistence, one file per dataset.

mod indexing;
mod memory;

pub use indexing::{IndexReport, index_catalog, refresh_index};
pub use memory::MemoryVectorIndex;

use crate::Result;
use std::collections::BTreeMap;

/// String metadata stored alongside each vector.
pub type Metadata = BTreeMap<String, String>;

/// A nearest-neighbour hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Stored id.
    pub id: String,
    /// Stored document text.
    pub document: String,
    /// Stored metadata.
    pub metadata: Metadata,
    /// Cosine similarity to the query in `[-1, 1]`.
    pub similarity: f32,
}

/// Trait for vector index backends.
///
/// Methods take `&self` so an index can be shared via `Arc<dyn VectorIndex>`;
/// implementations use interior mutability.
pub trait VectorIndex: Send + Sync {
    /// The dimensionality of stored vectors.
    fn dimensions(&self) -> usize;

    /// Adds (or replaces by id) a batch of vectors.
    ///
    /// All slices must have the same length.
    ///
    /// # Errors
    ///
    /// Returns an error on length or dimension mismatch.
    fn add_batch(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        documents: &[String],
        metadata: &[Metadata],
    ) -> Result<()>;

    /// Returns up to `k` neighbours ordered by descending similarity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query dimension does not match.
    fn query_nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Number of stored vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count(&self) -> Result<usize>;

    /// Removes all vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<()>;

    /// Flushes the index to durable storage, if it has any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn persist(&self) -> Result<()> {
        Ok(())
    }
}
