//! Tag categories, per-category results and reasoning payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorical label that can be attached to a syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    /// Significant project component.
    ProjectHeavy,
    /// Emphasis on exams and quizzes.
    ExamHeavy,
    /// Many assignments or homework sets.
    AssignmentHeavy,
    /// Prerequisite knowledge or courses required.
    NeedsPrerequisite,
    /// Attendance is enforced.
    AttendanceRequired,
}

impl TagCategory {
    /// All categories in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::ProjectHeavy,
        Self::ExamHeavy,
        Self::AssignmentHeavy,
        Self::NeedsPrerequisite,
        Self::AttendanceRequired,
    ];

    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectHeavy => "project_heavy",
            Self::ExamHeavy => "exam_heavy",
            Self::AssignmentHeavy => "assignment_heavy",
            Self::NeedsPrerequisite => "needs_prerequisite",
            Self::AttendanceRequired => "attendance_required",
        }
    }

    /// Fixed identifier used by downstream storage.
    #[must_use]
    pub const fn db_id(&self) -> u32 {
        match self {
            Self::ExamHeavy => 1,
            Self::ProjectHeavy => 2,
            Self::AssignmentHeavy => 3,
            Self::NeedsPrerequisite => 4,
            Self::AttendanceRequired => 5,
        }
    }

    /// Grade component whose share of the final grade can trigger this tag.
    #[must_use]
    pub const fn grade_component(&self) -> Option<GradeComponent> {
        match self {
            Self::ProjectHeavy => Some(GradeComponent::Project),
            Self::ExamHeavy => Some(GradeComponent::Exam),
            Self::AssignmentHeavy => Some(GradeComponent::Assignment),
            Self::NeedsPrerequisite | Self::AttendanceRequired => None,
        }
    }

    /// Parses a category name.
    ///
    /// Accepts the snake case name and a spaced or dashed variant, case-insensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

impl std::fmt::Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A graded component of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeComponent {
    /// Projects, portfolios, case studies.
    Project,
    /// Exams, midterms, quizzes.
    Exam,
    /// Homework, problem sets, labs, papers.
    Assignment,
    /// Attendance and participation.
    Attendance,
}

impl GradeComponent {
    /// Returns the string representation used in serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Exam => "exam",
            Self::Assignment => "assignment",
            Self::Attendance => "attendance",
        }
    }
}

/// Cumulative percentage of the final grade per component.
///
/// Percentages are additive across matched patterns and can exceed 100 when
/// grading text is matched by overlapping patterns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeDistribution(BTreeMap<GradeComponent, f64>);

impl GradeDistribution {
    /// Creates an empty distribution.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a percentage to a component bucket.
    pub fn add(&mut self, component: GradeComponent, percentage: f64) {
        *self.0.entry(component).or_insert(0.0) += percentage;
    }

    /// Returns the accumulated percentage for a component (0 when absent).
    #[must_use]
    pub fn get(&self, component: GradeComponent) -> f64 {
        self.0.get(&component).copied().unwrap_or(0.0)
    }

    /// Returns true if the component was matched at least once.
    #[must_use]
    pub fn contains(&self, component: GradeComponent) -> bool {
        self.0.contains_key(&component)
    }

    /// Returns true if no component was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over matched components in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (GradeComponent, f64)> + '_ {
        self.0.iter().map(|(component, pct)| (*component, *pct))
    }
}

/// Prerequisite detection result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteInfo {
    /// Weighted count of prerequisite signals.
    pub count: usize,
    /// Course codes referenced in the prerequisite section.
    pub courses: Vec<String>,
    /// Whether the count reaches the prerequisite threshold.
    pub has_prerequisites: bool,
}

/// Tagging decision for a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResult {
    /// The category this result describes.
    pub category: TagCategory,
    /// Whether the tag applies.
    pub is_tagged: bool,
    /// Keyword occurrences (weighted count for prerequisites).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_count: Option<usize>,
    /// Share of the final grade for grade-backed categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_percentage: Option<f64>,
    /// Policy strength for the attendance category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_strength: Option<f64>,
    /// Fixed storage identifier.
    pub db_id: u32,
}

impl TagResult {
    /// Creates an untagged result for a category.
    #[must_use]
    pub const fn untagged(category: TagCategory) -> Self {
        Self {
            category,
            is_tagged: false,
            keyword_count: None,
            grade_percentage: None,
            attendance_strength: None,
            db_id: category.db_id(),
        }
    }
}

/// Tagging decisions for every category, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<TagCategory, TagResult>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a result, replacing any previous result for the category.
    pub fn insert(&mut self, result: TagResult) {
        self.0.insert(result.category, result);
    }

    /// Returns the result for a category.
    #[must_use]
    pub fn get(&self, category: TagCategory) -> Option<&TagResult> {
        self.0.get(&category)
    }

    /// Returns true if the category is present and tagged.
    #[must_use]
    pub fn is_tagged(&self, category: TagCategory) -> bool {
        self.get(category).is_some_and(|r| r.is_tagged)
    }

    /// Categories that were tagged, in stable order.
    #[must_use]
    pub fn tagged(&self) -> Vec<TagCategory> {
        self.0
            .values()
            .filter(|r| r.is_tagged)
            .map(|r| r.category)
            .collect()
    }

    /// Iterates over all results.
    pub fn iter(&self) -> impl Iterator<Item = &TagResult> {
        self.0.values()
    }

    /// Number of categories present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no category is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Full reasoning detail behind a tagging decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagReasoning {
    /// Keyword-count or grade-share categories (project, exam, assignment).
    Weighted {
        /// Whether the tag applies.
        is_tagged: bool,
        /// Keyword occurrences.
        keyword_count: usize,
        /// Keyword count needed to tag.
        keyword_threshold: usize,
        /// Share of the final grade.
        grade_percentage: f64,
        /// Grade share needed to tag.
        grade_threshold: f64,
    },
    /// Prerequisite detection.
    Prerequisite {
        /// Whether the tag applies.
        is_tagged: bool,
        /// Weighted prerequisite signal count.
        keyword_count: usize,
        /// Count needed to tag.
        keyword_threshold: usize,
        /// Course codes found in the prerequisite section.
        courses_found: Vec<String>,
    },
    /// Attendance policy analysis.
    Attendance {
        /// Whether the tag applies.
        is_tagged: bool,
        /// Policy strength in [0, 1].
        policy_strength: f64,
        /// Strength needed to tag.
        strength_threshold: f64,
        /// Attendance keyword occurrences.
        keyword_count: usize,
        /// Reported keyword threshold.
        keyword_threshold: usize,
    },
}

impl TagReasoning {
    /// Whether the tag applies.
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        match self {
            Self::Weighted { is_tagged, .. }
            | Self::Prerequisite { is_tagged, .. }
            | Self::Attendance { is_tagged, .. } => *is_tagged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_ids_are_fixed() {
        assert_eq!(TagCategory::ExamHeavy.db_id(), 1);
        assert_eq!(TagCategory::ProjectHeavy.db_id(), 2);
        assert_eq!(TagCategory::AssignmentHeavy.db_id(), 3);
        assert_eq!(TagCategory::NeedsPrerequisite.db_id(), 4);
        assert_eq!(TagCategory::AttendanceRequired.db_id(), 5);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            TagCategory::parse("exam_heavy"),
            Some(TagCategory::ExamHeavy)
        );
        assert_eq!(
            TagCategory::parse("Attendance Required"),
            Some(TagCategory::AttendanceRequired)
        );
        assert_eq!(
            TagCategory::parse("needs-prerequisite"),
            Some(TagCategory::NeedsPrerequisite)
        );
        assert_eq!(TagCategory::parse("lecture_heavy"), None);
    }

    #[test]
    fn test_grade_distribution_accumulates() {
        let mut dist = GradeDistribution::new();
        dist.add(GradeComponent::Exam, 30.0);
        dist.add(GradeComponent::Exam, 20.0);
        assert!((dist.get(GradeComponent::Exam) - 50.0).abs() < f64::EPSILON);
        assert!(dist.get(GradeComponent::Project).abs() < f64::EPSILON);
        assert!(!dist.contains(GradeComponent::Project));
    }

    #[test]
    fn test_tag_set_serializes_by_category_name() {
        let mut set = TagSet::new();
        let mut result = TagResult::untagged(TagCategory::ExamHeavy);
        result.is_tagged = true;
        result.keyword_count = Some(8);
        set.insert(result);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["exam_heavy"]["is_tagged"], true);
        assert_eq!(json["exam_heavy"]["keyword_count"], 8);
        assert_eq!(json["exam_heavy"]["db_id"], 1);
        assert!(json["exam_heavy"].get("attendance_strength").is_none());
    }

    #[test]
    fn test_reasoning_serializes_flat() {
        let reasoning = TagReasoning::Prerequisite {
            is_tagged: true,
            keyword_count: 5,
            keyword_threshold: 2,
            courses_found: vec!["CS 1331".to_string()],
        };
        let json = serde_json::to_value(&reasoning).unwrap();
        assert_eq!(json["courses_found"][0], "CS 1331");
        assert!(reasoning.is_tagged());
    }
}
