//! Search results produced by direct and semantic retrieval.

use super::{CatalogEntry, CourseLevel, DatasetKind};
use serde::{Deserialize, Serialize};

/// How a result was retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Keyword match over the record text.
    Direct,
    /// Nearest-neighbour match in the vector index.
    Semantic,
    /// Found by both sources.
    #[serde(rename = "Direct+Semantic")]
    DirectSemantic,
}

impl MatchType {
    /// Returns the match type as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Semantic => "Semantic",
            Self::DirectSemantic => "Direct+Semantic",
        }
    }

    /// Human-readable label used in rendered output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct => "Direct Match",
            Self::Semantic => "Semantic Match",
            Self::DirectSemantic => "Direct + Semantic Match",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Record key (course id or MOOC name).
    pub key: String,
    /// Record title.
    pub title: String,
    /// Dataset the record belongs to.
    pub dataset: DatasetKind,
    /// Relevance score in `[0, 1]`.
    pub score: f64,
    /// Retrieval source.
    pub match_type: MatchType,
    /// Skills that matched, without duplicates, in discovery order.
    pub matching_skills: Vec<String>,
    /// Academic level.
    pub course_level: CourseLevel,
    /// Subject prefix for catalog courses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_prefix: Option<String>,
    /// Link for online courses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SearchResult {
    /// Builds a result for a catalog record. The score is clamped to `[0, 1]`.
    #[must_use]
    pub fn from_entry<R: CatalogEntry>(
        entry: &R,
        score: f64,
        match_type: MatchType,
        matching_skills: Vec<String>,
    ) -> Self {
        let mut result = Self {
            key: entry.key().to_string(),
            title: entry.title().to_string(),
            dataset: R::KIND,
            score,
            match_type,
            matching_skills: Vec::new(),
            course_level: entry.level(),
            subject_prefix: entry.subject_prefix().map(str::to_string),
            link: entry.link().map(str::to_string),
        };
        result.merge_skills(&matching_skills);
        result.clamp_score();
        result
    }

    /// Clamps the score into `[0, 1]`.
    pub fn clamp_score(&mut self) {
        self.score = self.score.clamp(0.0, 1.0);
    }

    /// Adds skills that are not already listed.
    pub fn merge_skills(&mut self, skills: &[String]) {
        for skill in skills {
            if !self.matching_skills.contains(skill) {
                self.matching_skills.push(skill.clone());
            }
        }
    }

    /// Returns true if the result has at least one matching skill.
    #[must_use]
    pub fn has_matching_skills(&self) -> bool {
        !self.matching_skills.is_empty()
    }
}
