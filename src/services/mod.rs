//! Business logic services.
//!
//! Services orchestrate the catalog, skill extraction, search and storage
//! components and provide high-level operations.

mod recommendation;

pub use recommendation::{NO_SKILLS_REASON, RecommendationRequest, RecommendationService};
