//! Static regex tables used by the tagging engine.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// How a grade figure should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeStyle {
    /// `Exam 30%`.
    Percent,
    /// `Exam 150 points`; always converted using the total.
    Points,
    /// `Exam 30` table rows.
    Bare,
}

/// A grade-component pattern. Capture 1 is the component, capture 2 the figure.
#[derive(Debug)]
pub struct GradePattern {
    /// The compiled pattern.
    pub regex: Regex,
    /// How the figure is interpreted.
    pub style: GradeStyle,
}

/// Component alternations, in scan order.
const COMPONENT_GROUPS: [&str; 5] = [
    "project|projects|final project|team project",
    "exam|exams|midterm|final exam",
    "assignment|assignments|homework",
    "quiz|quizzes",
    "participation|attendance",
];

/// Grade patterns: every percent pattern, then points, then bare rows.
pub static GRADE_PATTERNS: LazyLock<Vec<GradePattern>> = LazyLock::new(|| {
    let families = [
        (GradeStyle::Percent, r"(?i)({})[^\n]*?(\d+)%"),
        (GradeStyle::Points, r"(?i)({})[^\n]*?(\d+)\s*(?:pts|points)"),
        (GradeStyle::Bare, r"(?i)({})\s*(\d+)"),
    ];
    families
        .iter()
        .flat_map(|(style, template)| {
            COMPONENT_GROUPS.iter().map(move |group| GradePattern {
                regex: Regex::new(&template.replace("{}", group))
                    .expect("static regex: grade component"),
                style: *style,
            })
        })
        .collect()
});

/// First number after the word "total".
pub static TOTAL_POINTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)total[^\n]*?(\d+)").expect("static regex: total points"));

/// Team project figure, always credited to projects.
pub static TEAM_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)team\s*project[^\n]*?(\d+)").expect("static regex: team project")
});

/// Grading section that mentions attendance.
pub static ATTENDANCE_IN_GRADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(grading|evaluation|assessment).*?(attendance|participation|present)")
        .expect("static regex: attendance in grading")
});

/// Labelled attendance policy section, up to the next blank line.
pub static ATTENDANCE_POLICY_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(attendance|participation).*?policy[:\n].*?(\n\n|\n\s*\n)")
        .expect("static regex: attendance policy section")
});

/// Attendance carrying an explicit grade weight.
pub static ATTENDANCE_GRADE_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(attendance|participation)[^\n]*?(\d+)(?:%|\s*points|\s*pts)")
        .expect("static regex: attendance grade weight")
});

/// Explicit absence limit.
pub static ABSENCE_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(no more than|only|limit of|up to|maximum of)\s*(\d+)\s*(absences|missed)")
        .expect("static regex: absence limit")
});

/// Attendance affecting the outcome.
pub static OUTCOME_IMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(affect|impact|influence|determine)[^\n]*?(grade|score|evaluation|assessment)")
        .expect("static regex: outcome impact")
});

/// Labelled prerequisite section, up to the next blank line or the end of the text.
pub static PREREQUISITE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)prerequisites?:(.+?)(?:\n\s*\n|\z)")
        .expect("static regex: prerequisite section")
});

/// Course code such as `CS 1331` or `MATH1554A`. Case-sensitive.
pub static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{2,4}\s*\d{3,4}[A-Z]?").expect("static regex: course code")
});
