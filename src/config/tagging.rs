//! Tagging lexicons and thresholds.

use crate::models::TagCategory;
use serde::Deserialize;

/// Keyword lexicon and thresholds for one tag category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    /// Phrases counted as whole words, case-insensitive.
    pub keywords: Vec<String>,
    /// Keyword occurrences needed to tag.
    pub keyword_threshold: usize,
    /// Share of the final grade needed to tag, for grade-backed categories.
    pub grade_threshold: Option<f64>,
}

impl CategoryRule {
    fn new(keywords: &[&str], keyword_threshold: usize, grade_threshold: Option<f64>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            keyword_threshold,
            grade_threshold,
        }
    }
}

/// Enforcement phrase lists used by the attendance scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendancePhrases {
    /// Phrases worth 0.4 per sentence.
    pub strong: Vec<String>,
    /// Phrases worth 0.2 per sentence.
    pub moderate: Vec<String>,
    /// Phrases worth 0.1 per sentence.
    pub weak: Vec<String>,
    /// Phrases worth 0.15 each when found anywhere in the text.
    pub extra: Vec<String>,
}

impl Default for AttendancePhrases {
    fn default() -> Self {
        Self {
            strong: to_strings(&[
                "mandatory",
                "required",
                "must attend",
                "will be taken",
                "grade will be affected",
                "participation grade",
                "expected to attend",
                "students are expected to",
                "attendance will be",
                "counted toward",
                "attendance is part of",
                "attendance & participation",
                "attendance and participation",
            ]),
            moderate: to_strings(&[
                "expected to attend",
                "should attend",
                "attendance is important",
                "regular attendance",
                "attendance contributes",
                "attendance affects",
            ]),
            weak: to_strings(&[
                "encouraged to attend",
                "recommended",
                "attendance helps",
                "attendance is encouraged",
                "should try to attend",
            ]),
            extra: to_strings(&["arrive on time", "expected to attend", "attend class"]),
        }
    }
}

/// Immutable tagging configuration.
///
/// Built once and shared by reference with every tagging component.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggingConfig {
    /// Project-heavy rule.
    pub project: CategoryRule,
    /// Exam-heavy rule.
    pub exam: CategoryRule,
    /// Assignment-heavy rule.
    pub assignment: CategoryRule,
    /// Prerequisite rule.
    pub prerequisite: CategoryRule,
    /// Attendance rule. Its keyword threshold is informational only.
    pub attendance: CategoryRule,
    /// Policy strength needed to tag attendance.
    pub attendance_strength_threshold: f64,
    /// Weight added to the prerequisite count for a labelled section.
    pub prerequisite_section_weight: usize,
    /// Attendance enforcement phrases.
    pub attendance_phrases: AttendancePhrases,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            project: CategoryRule::new(
                &[
                    "project",
                    "projects",
                    "group project",
                    "individual project",
                    "final project",
                    "team project",
                    "research project",
                    "design project",
                    "project-based",
                    "deliverable",
                    "portfolio",
                    "case study",
                ],
                5,
                Some(25.0),
            ),
            exam: CategoryRule::new(
                &[
                    "exam",
                    "exams",
                    "midterm",
                    "midterms",
                    "final exam",
                    "quiz",
                    "quizzes",
                    "test",
                    "tests",
                    "assessment",
                    "assessments",
                    "examination",
                ],
                7,
                Some(30.0),
            ),
            assignment: CategoryRule::new(
                &[
                    "assignment",
                    "assignments",
                    "homework",
                    "homeworks",
                    "problem set",
                    "problem sets",
                    "exercise",
                    "exercises",
                    "lab",
                    "labs",
                    "paper",
                    "papers",
                    "essay",
                    "essays",
                    "report",
                    "reports",
                    "writing",
                    "readings",
                ],
                10,
                Some(40.0),
            ),
            prerequisite: CategoryRule::new(
                &[
                    "prerequisite",
                    "prerequisites",
                    "prior knowledge",
                    "required course",
                    "required courses",
                    "previous course",
                    "previous courses",
                    "co-requisite",
                    "foundations",
                    "background in",
                    "familiarity with",
                    "experience with",
                ],
                2,
                None,
            ),
            attendance: CategoryRule::new(
                &[
                    "attendance",
                    "attendances",
                    "mandatory",
                    "required",
                    "participate",
                    "participation",
                    "present",
                    "presence",
                    "absence",
                    "absences",
                    "miss class",
                    "missing class",
                    "attend",
                    "expected to attend",
                    "students are expected",
                    "arrive on time",
                    "classroom participation",
                    "attendance policy",
                    "attend class",
                    "attendance grade",
                ],
                3,
                None,
            ),
            attendance_strength_threshold: 0.3,
            prerequisite_section_weight: 3,
            attendance_phrases: AttendancePhrases::default(),
        }
    }
}

impl TaggingConfig {
    /// Returns the rule for a category.
    #[must_use]
    pub const fn rule(&self, category: TagCategory) -> &CategoryRule {
        match category {
            TagCategory::ProjectHeavy => &self.project,
            TagCategory::ExamHeavy => &self.exam,
            TagCategory::AssignmentHeavy => &self.assignment,
            TagCategory::NeedsPrerequisite => &self.prerequisite,
            TagCategory::AttendanceRequired => &self.attendance,
        }
    }

    /// Returns the keyword lexicon for a category.
    #[must_use]
    pub fn keywords(&self, category: TagCategory) -> &[String] {
        &self.rule(category).keywords
    }

    /// Applies threshold overrides from a config file section.
    pub fn apply_overrides(&mut self, overrides: &ConfigFileTagging) {
        if let Some(v) = overrides.project_keyword_threshold {
            self.project.keyword_threshold = v;
        }
        if let Some(v) = overrides.project_grade_threshold {
            self.project.grade_threshold = Some(v);
        }
        if let Some(v) = overrides.exam_keyword_threshold {
            self.exam.keyword_threshold = v;
        }
        if let Some(v) = overrides.exam_grade_threshold {
            self.exam.grade_threshold = Some(v);
        }
        if let Some(v) = overrides.assignment_keyword_threshold {
            self.assignment.keyword_threshold = v;
        }
        if let Some(v) = overrides.assignment_grade_threshold {
            self.assignment.grade_threshold = Some(v);
        }
        if let Some(v) = overrides.prerequisite_keyword_threshold {
            self.prerequisite.keyword_threshold = v;
        }
        if let Some(v) = overrides.attendance_strength_threshold {
            self.attendance_strength_threshold = v;
        }
    }
}

/// `[tagging]` section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileTagging {
    /// Project keyword threshold.
    pub project_keyword_threshold: Option<usize>,
    /// Project grade threshold (percent).
    pub project_grade_threshold: Option<f64>,
    /// Exam keyword threshold.
    pub exam_keyword_threshold: Option<usize>,
    /// Exam grade threshold (percent).
    pub exam_grade_threshold: Option<f64>,
    /// Assignment keyword threshold.
    pub assignment_keyword_threshold: Option<usize>,
    /// Assignment grade threshold (percent).
    pub assignment_grade_threshold: Option<f64>,
    /// Prerequisite count threshold.
    pub prerequisite_keyword_threshold: Option<usize>,
    /// Attendance policy strength threshold.
    pub attendance_strength_threshold: Option<f64>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
