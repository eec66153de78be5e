//! Weighted skills and job seniority.

use serde::{Deserialize, Serialize};

/// Smallest weight a skill can carry.
pub const MIN_SKILL_WEIGHT: f64 = 1.0;

/// Largest weight a skill can carry.
pub const MAX_SKILL_WEIGHT: f64 = 2.0;

/// A canonical skill with its importance for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSkill {
    /// Normalized skill name.
    pub name: String,
    /// Importance weight in `[1.0, 2.0]`.
    pub weight: f64,
}

impl WeightedSkill {
    /// Creates a weighted skill, clamping the weight into range.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight: weight.clamp(MIN_SKILL_WEIGHT, MAX_SKILL_WEIGHT),
        }
    }
}

/// Job seniority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Entry-level roles.
    #[default]
    Entry,
    /// Mid-level roles.
    Mid,
    /// Senior, lead and management roles.
    Senior,
}

impl Seniority {
    /// Infers seniority from title keywords.
    #[must_use]
    pub fn infer_from_title(job_title: &str) -> Self {
        const SENIOR_TERMS: [&str; 5] = ["senior", "lead", "manager", "director", "principal"];
        const MID_TERMS: [&str; 3] = ["mid", "intermediate", "associate"];

        let title = job_title.to_lowercase();
        if SENIOR_TERMS.iter().any(|term| title.contains(term)) {
            Self::Senior
        } else if MID_TERMS.iter().any(|term| title.contains(term)) {
            Self::Mid
        } else {
            Self::Entry
        }
    }

    /// Parses a caller-supplied seniority label.
    ///
    /// Accepts `Entry-Level`, `Mid-Level`, `Senior` and the bare names,
    /// case-insensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entry-level" | "entry" | "entry level" => Some(Self::Entry),
            "mid-level" | "mid" | "mid level" => Some(Self::Mid),
            "senior" | "senior-level" | "senior level" => Some(Self::Senior),
            _ => None,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "Entry-Level",
            Self::Mid => "Mid-Level",
            Self::Senior => "Senior",
        }
    }
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
