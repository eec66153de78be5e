//! Syllabus auto-tagging.
//!
//! A syllabus is classified by independent heuristics whose results are
//! combined by [`SyllabusTagger`]:
//!
//! | Analyzer | Signal |
//! |----------|--------|
//! | [`KeywordScorer`] | Whole-word lexicon hits per category |
//! | [`GradeDistributionExtractor`] | Share of the final grade per component |
//! | [`AttendancePolicyScorer`] | Attendance enforcement strength in `[0, 1]` |
//! | [`PrerequisiteDetector`] | Prerequisite section, keywords and course codes |
//!
//! All analyzers are pure functions of the text and the injected
//! [`TaggingConfig`](crate::config::TaggingConfig).

mod attendance;
mod grades;
mod keyword;
mod patterns;
mod prerequisites;
mod tagger;
pub mod text;

pub use attendance::AttendancePolicyScorer;
pub use grades::GradeDistributionExtractor;
pub use keyword::KeywordScorer;
pub use prerequisites::PrerequisiteDetector;
pub use tagger::{SyllabusAnalysis, SyllabusTagger};
