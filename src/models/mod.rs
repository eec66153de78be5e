//! Data models for coursematch.
//!
//! This module contains the typed records shared by tagging, search and the
//! recommendation service.

mod catalog;
mod recommendation;
mod search;
mod skill;
mod tag;

pub use catalog::{CatalogEntry, CourseLevel, CourseRecord, DatasetKind, MoocRecord};
pub use recommendation::{RecommendationOutcome, Recommendations, SkillGroup};
pub use search::{MatchType, SearchResult};
pub use skill::{MAX_SKILL_WEIGHT, MIN_SKILL_WEIGHT, Seniority, WeightedSkill};
pub use tag::{
    GradeComponent, GradeDistribution, PrerequisiteInfo, TagCategory, TagReasoning, TagResult,
    TagSet,
};
