//! # Coursematch
//!
//! Syllabus auto-tagging and job-to-course recommendation.
//!
//! Coursematch reads free-text syllabi and classifies them with keyword and
//! regex heuristics (exam heavy, project heavy, attendance required, ...), and
//! recommends catalog courses and MOOCs for a job description using hybrid
//! keyword + vector search with domain-aware re-ranking.
//!
//! ## Features
//!
//! - Pure, stateless tagging engine with a typed reasoning payload
//! - Skill extraction as an ordered chain of strategies (LLM, title heuristics, keyword scan)
//! - Direct keyword search and embedding-based semantic search with score fusion
//! - Seniority and domain filtering over the fused results
//! - Pluggable embedders and vector indexes
//!
//! ## Example
//!
//! ```rust
//! use coursematch::{SyllabusTagger, TagCategory};
//!
//! let tagger = SyllabusTagger::with_defaults();
//! let tags = tagger.generate_tags("Midterm Exam 30%, Final Project 25%, Homework 20%");
//! assert!(tags.get(TagCategory::ExamHeavy).is_some_and(|t| t.is_tagged));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod search;
pub mod services;
pub mod skills;
pub mod storage;
pub mod tagging;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogCache};
pub use config::{CoursematchConfig, RankingPolicy, TaggingConfig};
pub use embedding::Embedder;
pub use llm::LlmProvider;
pub use models::{
    CourseLevel, CourseRecord, DatasetKind, GradeComponent, GradeDistribution, MatchType,
    MoocRecord, PrerequisiteInfo, RecommendationOutcome, Recommendations, SearchResult, Seniority,
    TagCategory, TagReasoning, TagResult, TagSet, WeightedSkill,
};
pub use services::{RecommendationRequest, RecommendationService};
pub use storage::{MemoryVectorIndex, VectorIndex};
pub use tagging::SyllabusTagger;

/// Error type for coursematch operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty text handed to an embedder, dimension mismatch, bad config values |
/// | `OperationFailed` | I/O errors, CSV or TOML parse failures, LLM or embedding backend failures |
/// | `FeatureNotEnabled` | Selecting a backend that requires a compile-time feature |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An embedder is asked to embed empty text
    /// - Vectors with the wrong dimensionality are added to or queried from an index
    /// - A configuration value cannot be parsed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Catalog CSV files cannot be opened
    /// - The vector index file cannot be read or written
    /// - The LLM endpoint is unreachable or returns an error status
    /// - The embedding model fails to load
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Feature not enabled (requires feature flag).
    ///
    /// Raised when:
    /// - The fastembed embedder is requested without `fastembed-embeddings`
    #[error("feature not enabled: {0} (compile with --features {0})")]
    FeatureNotEnabled(String),
}

/// Result type alias for coursematch operations.
pub type Result<T> = std::result::Result<T, Error>;
