//! Syllabus tagger: combines the individual analyzers into tag decisions.

use super::attendance::AttendancePolicyScorer;
use super::grades::GradeDistributionExtractor;
use super::keyword::KeywordScorer;
use super::prerequisites::PrerequisiteDetector;
use super::text::normalize;
use crate::config::TaggingConfig;
use crate::models::{
    GradeDistribution, PrerequisiteInfo, TagCategory, TagReasoning, TagResult, TagSet,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Raw signals computed once per syllabus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyllabusAnalysis {
    /// Grade share per component.
    pub grades: GradeDistribution,
    /// Attendance policy strength in `[0, 1]`.
    pub attendance_strength: f64,
    /// Prerequisite detection result.
    pub prerequisites: PrerequisiteInfo,
    /// Keyword counts per category.
    pub keyword_counts: BTreeMap<TagCategory, usize>,
}

impl SyllabusAnalysis {
    /// Keyword count for a category (0 when not counted).
    #[must_use]
    pub fn keyword_count(&self, category: TagCategory) -> usize {
        self.keyword_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Tags syllabi using keyword, grade, attendance and prerequisite signals.
///
/// The tagger is stateless after construction and can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct SyllabusTagger {
    config: Arc<TaggingConfig>,
    keywords: KeywordScorer,
    grades: GradeDistributionExtractor,
    attendance: AttendancePolicyScorer,
    prerequisites: PrerequisiteDetector,
}

impl SyllabusTagger {
    /// Creates a tagger for the given configuration.
    #[must_use]
    pub fn new(config: Arc<TaggingConfig>) -> Self {
        Self {
            keywords: KeywordScorer::new(&config),
            grades: GradeDistributionExtractor::new(&config),
            attendance: AttendancePolicyScorer::new(&config),
            prerequisites: PrerequisiteDetector::new(&config),
            config,
        }
    }

    /// Creates a tagger with the default lexicons and thresholds.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(TaggingConfig::default()))
    }

    /// Returns the tagging configuration.
    #[must_use]
    pub fn config(&self) -> &TaggingConfig {
        &self.config
    }

    /// Computes all raw signals for a syllabus.
    ///
    /// Blank text yields an all-zero analysis.
    #[must_use]
    pub fn analyze(&self, text: &str) -> SyllabusAnalysis {
        if text.trim().is_empty() {
            return SyllabusAnalysis {
                keyword_counts: TagCategory::ALL.into_iter().map(|c| (c, 0)).collect(),
                ..SyllabusAnalysis::default()
            };
        }

        let text = normalize(text);
        let keyword_counts = TagCategory::ALL
            .into_iter()
            .map(|category| (category, self.keywords.count(&text, category)))
            .collect();

        let analysis = SyllabusAnalysis {
            grades: self.grades.extract(&text),
            attendance_strength: self.attendance.score(&text),
            prerequisites: self.prerequisites.detect(&text),
            keyword_counts,
        };

        tracing::debug!(
            attendance_strength = analysis.attendance_strength,
            prerequisite_count = analysis.prerequisites.count,
            grade_components = analysis.grades.iter().count(),
            "Analyzed syllabus"
        );
        analysis
    }

    /// Generates tag decisions for a syllabus.
    #[must_use]
    pub fn generate_tags(&self, text: &str) -> TagSet {
        let analysis = self.analyze(text);
        let mut tags = TagSet::new();

        for category in TagCategory::ALL {
            let mut result = TagResult::untagged(category);
            result.is_tagged = self.decide(category, &analysis);
            match category {
                TagCategory::ProjectHeavy
                | TagCategory::ExamHeavy
                | TagCategory::AssignmentHeavy => {
                    result.keyword_count = Some(analysis.keyword_count(category));
                    result.grade_percentage = category
                        .grade_component()
                        .map(|component| analysis.grades.get(component));
                },
                TagCategory::NeedsPrerequisite => {
                    result.keyword_count = Some(analysis.prerequisites.count);
                },
                TagCategory::AttendanceRequired => {
                    result.attendance_strength = Some(analysis.attendance_strength);
                },
            }
            tags.insert(result);
        }

        tags
    }

    /// Explains each tag decision with the signals and thresholds behind it.
    #[must_use]
    pub fn get_tag_reasoning(&self, text: &str) -> BTreeMap<TagCategory, TagReasoning> {
        let analysis = self.analyze(text);

        TagCategory::ALL
            .into_iter()
            .map(|category| {
                let rule = self.config.rule(category);
                let is_tagged = self.decide(category, &analysis);
                let reasoning = match category {
                    TagCategory::ProjectHeavy
                    | TagCategory::ExamHeavy
                    | TagCategory::AssignmentHeavy => TagReasoning::Weighted {
                        is_tagged,
                        keyword_count: analysis.keyword_count(category),
                        keyword_threshold: rule.keyword_threshold,
                        grade_percentage: category
                            .grade_component()
                            .map_or(0.0, |component| analysis.grades.get(component)),
                        grade_threshold: rule.grade_threshold.unwrap_or(0.0),
                    },
                    TagCategory::NeedsPrerequisite => TagReasoning::Prerequisite {
                        is_tagged,
                        keyword_count: analysis.prerequisites.count,
                        keyword_threshold: rule.keyword_threshold,
                        courses_found: analysis.prerequisites.courses.clone(),
                    },
                    TagCategory::AttendanceRequired => TagReasoning::Attendance {
                        is_tagged,
                        policy_strength: analysis.attendance_strength,
                        strength_threshold: self.config.attendance_strength_threshold,
                        keyword_count: analysis.keyword_count(category),
                        keyword_threshold: rule.keyword_threshold,
                    },
                };
                (category, reasoning)
            })
            .collect()
    }

    /// Applies the decision rule for one category.
    fn decide(&self, category: TagCategory, analysis: &SyllabusAnalysis) -> bool {
        match category {
            TagCategory::NeedsPrerequisite => analysis.prerequisites.has_prerequisites,
            TagCategory::AttendanceRequired => {
                analysis.attendance_strength >= self.config.attendance_strength_threshold
            },
            TagCategory::ProjectHeavy | TagCategory::ExamHeavy | TagCategory::AssignmentHeavy => {
                let rule = self.config.rule(category);
                let by_keywords = analysis.keyword_count(category) >= rule.keyword_threshold;
                let by_grade = match (category.grade_component(), rule.grade_threshold) {
                    (Some(component), Some(threshold)) => {
                        analysis.grades.get(component) >= threshold
                    },
                    _ => false,
                };
                by_keywords || by_grade
            },
        }
    }
}

impl Default for SyllabusTagger {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_grading_line() {
        let tagger = SyllabusTagger::with_defaults();
        let tags = tagger.generate_tags("Midterm Exam 30%, Final Project 25%, Homework 20%");

        assert!(tags.is_tagged(TagCategory::ExamHeavy));
        assert!(tags.is_tagged(TagCategory::ProjectHeavy));
        assert!(!tags.is_tagged(TagCategory::AssignmentHeavy));
        assert!(!tags.is_tagged(TagCategory::NeedsPrerequisite));
        assert!(!tags.is_tagged(TagCategory::AttendanceRequired));

        let exam = tags.get(TagCategory::ExamHeavy).unwrap();
        assert_eq!(exam.db_id, 1);
        assert_eq!(exam.grade_percentage, Some(30.0));
    }

    #[test]
    fn test_blank_text_is_all_untagged() {
        let tagger = SyllabusTagger::with_defaults();
        for text in ["", "   \n\t  "] {
            let tags = tagger.generate_tags(text);
            assert_eq!(tags.len(), 5);
            assert!(tags.tagged().is_empty());
            assert_eq!(
                tags.get(TagCategory::ProjectHeavy).unwrap().keyword_count,
                Some(0)
            );
            assert_eq!(
                tags.get(TagCategory::AttendanceRequired)
                    .unwrap()
                    .attendance_strength,
                Some(0.0)
            );
        }
    }

    #[test]
    fn test_tabs_are_normalized() {
        let tagger = SyllabusTagger::with_defaults();
        let tags = tagger.generate_tags("Exam\t35%");
        assert!(tags.is_tagged(TagCategory::ExamHeavy));
    }

    #[test]
    fn test_keyword_threshold_alone_tags() {
        let tagger = SyllabusTagger::with_defaults();
        let text = "There is a project. ".repeat(5);
        let tags = tagger.generate_tags(&text);
        let project = tags.get(TagCategory::ProjectHeavy).unwrap();
        assert_eq!(project.keyword_count, Some(5));
        assert!(project.is_tagged);
    }

    #[test]
    fn test_reasoning_matches_tags() {
        let tagger = SyllabusTagger::with_defaults();
        let text = "Prerequisites: CS 1331, MATH 1554. Prior knowledge of programming required.\n\n\
                    Attendance is mandatory and will be taken every class; absences affect your grade.";
        let tags = tagger.generate_tags(text);
        let reasoning = tagger.get_tag_reasoning(text);

        assert_eq!(reasoning.len(), 5);
        for (category, detail) in &reasoning {
            assert_eq!(detail.is_tagged(), tags.is_tagged(*category), "{category}");
        }

        match &reasoning[&TagCategory::NeedsPrerequisite] {
            TagReasoning::Prerequisite {
                courses_found,
                keyword_threshold,
                ..
            } => {
                assert_eq!(courses_found, &vec!["CS 1331", "MATH 1554"]);
                assert_eq!(*keyword_threshold, 2);
            },
            other => panic!("unexpected reasoning: {other:?}"),
        }
        match &reasoning[&TagCategory::AttendanceRequired] {
            TagReasoning::Attendance {
                is_tagged,
                keyword_threshold,
                ..
            } => {
                assert!(*is_tagged);
                assert_eq!(*keyword_threshold, 3);
            },
            other => panic!("unexpected reasoning: {other:?}"),
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let mut config = TaggingConfig::default();
        config.exam.keyword_threshold = 1;
        let tagger = SyllabusTagger::new(Arc::new(config));
        assert!(tagger.generate_tags("One quiz.").is_tagged(TagCategory::ExamHeavy));
    }
}
