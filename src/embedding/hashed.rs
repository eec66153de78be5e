//! Feature-hashing embedder.

use super::{DEFAULT_DIMENSIONS, Embedder};
use crate::{Error, Result};

/// Upper bound on tokens considered per text.
const MAX_TOKENS: usize = 2000;

/// Deterministic bag-of-words embedder.
///
/// Each lowercase alphanumeric token (and each adjacent token pair) is hashed
/// with FNV-1a into a signed bucket, then the vector is L2-normalized. Texts
/// sharing vocabulary get a positive cosine similarity; there is no notion of
/// synonyms.
#[derive(Debug, Clone, Copy)]
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    /// Creates an embedder with [`DEFAULT_DIMENSIONS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Creates an embedder with custom dimensions (minimum 1).
    #[must_use]
    pub const fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: if dimensions == 0 { 1 } else { dimensions },
        }
    }

    fn fnv1a(bytes: &[u8]) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in bytes {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        hash
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_feature(&self, embedding: &mut [f32], feature: &str, weight: f32) {
        let hash = Self::fnv1a(feature.as_bytes());
        let idx = (hash % self.dimensions as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        embedding[idx] += sign * weight;
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashedEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("Cannot embed empty text".to_string()));
        }

        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .filter(|t| !t.is_empty())
            .take(MAX_TOKENS)
            .collect();

        let mut embedding = vec![0.0f32; self.dimensions];
        for token in &tokens {
            self.add_feature(&mut embedding, token, 1.0);
        }
        for pair in tokens.windows(2) {
            self.add_feature(&mut embedding, &format!("{} {}", pair[0], pair[1]), 0.5);
        }

        let norm_sq: f32 = embedding.iter().map(|x| x * x).sum();
        if norm_sq > 0.0 {
            let inv_norm = norm_sq.sqrt().recip();
            for v in &mut embedding {
                *v *= inv_norm;
            }
        }
        Ok(embedding)
    }
}
