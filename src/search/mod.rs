//! Hybrid course search.
//!
//! Direct (keyword) and semantic (vector) retrieval run independently over a
//! dataset; their results are merged by [`combine`] and re-weighted by
//! [`ResultFilter`]. All scores are clamped to `[0, 1]`.

mod direct;
mod filter;
mod fusion;
mod matcher;
mod semantic;

pub use direct::DirectSearch;
pub use filter::ResultFilter;
pub use fusion::combine;
pub use matcher::SkillMatcher;
pub use semantic::{SemanticSearch, build_semantic_query, neighbor_count};
