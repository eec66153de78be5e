//! Whole-word skill matching.

use crate::models::WeightedSkill;
use crate::tagging::text::word_regex;
use regex::Regex;

/// Compiled whole-word patterns for a request's skills.
///
/// Patterns are built once per request and reused for every record.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    skills: Vec<(WeightedSkill, Option<Regex>)>,
}

impl SkillMatcher {
    /// Compiles patterns for the given skills.
    #[must_use]
    pub fn new(skills: &[WeightedSkill]) -> Self {
        Self {
            skills: skills
                .iter()
                .map(|skill| (skill.clone(), word_regex(&skill.name)))
                .collect(),
        }
    }

    /// Iterates over the skills in order.
    pub fn skills(&self) -> impl Iterator<Item = &WeightedSkill> {
        self.skills.iter().map(|(skill, _)| skill)
    }

    /// Number of skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns true if there are no skills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Iterates over skills with their patterns, skipping skills whose
    /// pattern could not be built.
    pub fn patterns(&self) -> impl Iterator<Item = (&WeightedSkill, &Regex)> {
        self.skills
            .iter()
            .filter_map(|(skill, regex)| regex.as_ref().map(|re| (skill, re)))
    }

    /// Skills that occur as whole words in the text, in skill order.
    #[must_use]
    pub fn matching<'a>(&'a self, text: &str) -> Vec<&'a WeightedSkill> {
        self.patterns()
            .filter(|(_, re)| re.is_match(text))
            .map(|(skill, _)| skill)
            .collect()
    }
}
