//! Prerequisite detection.

use super::patterns::{COURSE_CODE, PREREQUISITE_SECTION};
use super::text::word_regexes;
use crate::config::TaggingConfig;
use crate::models::PrerequisiteInfo;
use regex::Regex;

/// Detects prerequisite requirements and referenced course codes.
#[derive(Debug, Clone)]
pub struct PrerequisiteDetector {
    keywords: Vec<Regex>,
    section_weight: usize,
    threshold: usize,
}

impl PrerequisiteDetector {
    /// Creates a detector from the tagging configuration.
    #[must_use]
    pub fn new(config: &TaggingConfig) -> Self {
        Self {
            keywords: word_regexes(&config.prerequisite.keywords),
            section_weight: config.prerequisite_section_weight,
            threshold: config.prerequisite.keyword_threshold,
        }
    }

    /// Detects prerequisites in syllabus text.
    ///
    /// A labelled `Prerequisites:` section adds a fixed weight and is the only
    /// place course codes are collected from. Keyword occurrences anywhere in
    /// the text are added on top.
    #[must_use]
    pub fn detect(&self, text: &str) -> PrerequisiteInfo {
        let mut count = 0;
        let mut courses = Vec::new();

        if let Some(section) = PREREQUISITE_SECTION.captures(text).and_then(|c| c.get(1)) {
            count += self.section_weight;
            courses.extend(
                COURSE_CODE
                    .find_iter(section.as_str())
                    .map(|m| m.as_str().to_string()),
            );
        }

        count += self
            .keywords
            .iter()
            .map(|regex| regex.find_iter(text).count())
            .sum::<usize>();

        PrerequisiteInfo {
            count,
            courses,
            has_prerequisites: count >= self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> PrerequisiteInfo {
        PrerequisiteDetector::new(&TaggingConfig::default()).detect(text)
    }

    #[test]
    fn test_labelled_section() {
        let info = detect(
            "Prerequisites: CS 1331, MATH 1554. Prior knowledge of programming required.",
        );
        assert_eq!(info.courses, vec!["CS 1331", "MATH 1554"]);
        assert!(info.count >= 2);
        assert!(info.has_prerequisites);
    }

    #[test]
    fn test_codes_outside_section_are_ignored() {
        let info = detect("Prerequisite: CS 1331\n\nThis course follows CS 2110.");
        assert_eq!(info.courses, vec!["CS 1331"]);
        // section weight plus the "prerequisite" keyword
        assert_eq!(info.count, 4);
    }

    #[test]
    fn test_keywords_only() {
        let info = detect("Familiarity with linear algebra is helpful.");
        assert_eq!(info.count, 1);
        assert!(info.courses.is_empty());
        assert!(!info.has_prerequisites);
    }

    #[test]
    fn test_no_prerequisites() {
        let info = detect("Welcome to the course.");
        assert_eq!(info, PrerequisiteInfo::default());
    }
}
