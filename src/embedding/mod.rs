//! Embedding generation.
//!
//! The default [`HashedEmbedder`] is deterministic and needs no model files.
//! Real MiniLM embeddings are available through [`FastEmbedEmbedder`] when the
//! crate is built with the `fastembed-embeddings` feature.

mod hashed;

#[cfg(feature = "fastembed-embeddings")]
mod fastembed;

#[cfg(feature = "fastembed-embeddings")]
pub use fastembed::FastEmbedEmbedder;
pub use hashed::HashedEmbedder;

use crate::{Error, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Default embedding dimensions (matches all-MiniLM-L6-v2).
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Trait for embedding generators.
pub trait Embedder: Send + Sync {
    /// Returns the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Generates an embedding for the given text.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding generation fails.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generates embeddings for multiple texts.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding generation fails.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Selectable embedding backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedderKind {
    /// Feature-hashed bag of words.
    #[default]
    Hashed,
    /// all-MiniLM-L6-v2 via fastembed.
    FastEmbed,
}

impl EmbedderKind {
    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hashed => "hashed",
            Self::FastEmbed => "fastembed",
        }
    }

    /// Builds an embedder for this backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeatureNotEnabled`] when fastembed is requested but the
    /// crate was built without `fastembed-embeddings`.
    pub fn build(self) -> Result<Arc<dyn Embedder>> {
        match self {
            Self::Hashed => Ok(Arc::new(HashedEmbedder::new())),
            #[cfg(feature = "fastembed-embeddings")]
            Self::FastEmbed => Ok(Arc::new(FastEmbedEmbedder::new())),
            #[cfg(not(feature = "fastembed-embeddings"))]
            Self::FastEmbed => Err(Error::FeatureNotEnabled(
                "fastembed-embeddings".to_string(),
            )),
        }
    }
}

impl FromStr for EmbedderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hashed" | "hash" => Ok(Self::Hashed),
            "fastembed" | "minilm" => Ok(Self::FastEmbed),
            other => Err(Error::InvalidInput(format!(
                "unknown embedder '{other}' (expected hashed or fastembed)"
            ))),
        }
    }
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes cosine similarity between two embedding vectors.
///
/// Returns 0.0 for mismatched lengths, empty vectors or zero norms.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
