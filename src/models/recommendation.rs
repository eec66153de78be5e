//! Recommendation output types.

use super::{SearchResult, Seniority, WeightedSkill};
use serde::{Deserialize, Serialize};

/// Results grouped under a single skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    /// Skill name.
    pub skill: String,
    /// Catalog courses not already listed above this group.
    pub courses: Vec<SearchResult>,
    /// Online courses not already listed above this group.
    pub moocs: Vec<SearchResult>,
}

impl SkillGroup {
    /// Returns true if the group lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.moocs.is_empty()
    }
}

/// Ranked recommendations for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Job title as supplied.
    pub job_title: String,
    /// Seniority used for level weighting.
    pub seniority: Seniority,
    /// Majors considered relevant for the job title.
    pub relevant_majors: Vec<String>,
    /// Weighted skills, heaviest first.
    pub skills: Vec<WeightedSkill>,
    /// All filtered catalog course results, highest score first.
    pub courses: Vec<SearchResult>,
    /// All filtered MOOC results, highest score first.
    pub moocs: Vec<SearchResult>,
    /// Top catalog courses.
    pub top_courses: Vec<SearchResult>,
    /// Top MOOCs.
    pub top_moocs: Vec<SearchResult>,
    /// Per-skill groups for the heaviest skills.
    pub skill_groups: Vec<SkillGroup>,
}

impl Recommendations {
    /// Returns true if neither dataset produced a result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.moocs.is_empty()
    }
}

/// Outcome of a recommendation request.
///
/// Invalid requests are reported as a value so callers can show the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// Recommendations were produced (possibly empty).
    Recommended(Recommendations),
    /// The request was rejected before searching.
    Rejected {
        /// User-facing reason.
        reason: String,
    },
}

impl RecommendationOutcome {
    /// Returns the recommendations, if any were produced.
    #[must_use]
    pub const fn recommendations(&self) -> Option<&Recommendations> {
        match self {
            Self::Recommended(recs) => Some(recs),
            Self::Rejected { .. } => None,
        }
    }
}
