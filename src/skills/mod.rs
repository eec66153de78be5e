//! Job skill extraction, canonicalization and weighting.
//!
//! Raw skills come from an ordered chain of [`SkillExtractionStrategy`]s,
//! are collapsed by [`SkillNormalizer`] and weighted by [`weight_skills`].
//! [`MajorMapper`] decides which catalog subjects are relevant for a job.

mod extraction;
mod majors;
mod normalize;
mod weight;

pub use extraction::{
    KeywordSkillExtractor, LlmSkillExtractor, SkillExtractionStrategy, SkillExtractor,
    TitleFallbackExtractor,
};
pub use majors::MajorMapper;
pub use normalize::SkillNormalizer;
pub use weight::weight_skills;
