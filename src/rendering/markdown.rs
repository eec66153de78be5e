//! Markdown report for recommendations.

use crate::models::{
    CourseLevel, DatasetKind, RecommendationOutcome, Recommendations, SearchResult,
};
use crate::skills::MajorMapper;
use std::fmt::Write;

/// Shown when neither dataset produced a result.
pub const NO_RESULTS_MESSAGE: &str = "No matching courses found. Try modifying your job \
                                      description with more technical details.";

/// Renders an outcome as Markdown.
///
/// A rejected outcome renders as its reason.
#[must_use]
pub fn render_markdown(outcome: &RecommendationOutcome) -> String {
    match outcome {
        RecommendationOutcome::Recommended(recs) => render_recommendations(recs),
        RecommendationOutcome::Rejected { reason } => reason.clone(),
    }
}

fn render_recommendations(recs: &Recommendations) -> String {
    let mut out = String::new();
    let skills: Vec<&str> = recs.skills.iter().map(|s| s.name.as_str()).collect();

    let _ = writeln!(
        out,
        "## Course Recommendations for {} ({})\n",
        recs.job_title,
        recs.seniority.as_str()
    );
    let _ = writeln!(
        out,
        "Based on the identified skills: **{}**\n",
        skills.join(", ")
    );
    let _ = writeln!(
        out,
        "**Relevant Academic Areas:** {}\n",
        recs.relevant_majors.join(", ")
    );

    if recs.is_empty() {
        out.push_str(NO_RESULTS_MESSAGE);
        out.push('\n');
        return out;
    }

    out.push_str("### Top Overall Recommended Courses\n\n");
    write_section(&mut out, &recs.top_courses, &recs.top_moocs, true);

    for group in &recs.skill_groups {
        let _ = writeln!(out, "### Courses for {}\n", group.skill.to_uppercase());
        write_section(&mut out, &group.courses, &group.moocs, false);
    }

    out
}

fn write_section(
    out: &mut String,
    courses: &[SearchResult],
    moocs: &[SearchResult],
    with_skills: bool,
) {
    if !courses.is_empty() {
        out.push_str("#### Catalog Courses:\n\n");
        for result in courses {
            write_line(out, result, with_skills);
        }
        out.push('\n');
    }
    if !moocs.is_empty() {
        out.push_str("#### Online Courses (MOOCs):\n\n");
        for result in moocs {
            write_line(out, result, with_skills);
        }
        out.push('\n');
    }
}

fn write_line(out: &mut String, result: &SearchResult, with_skills: bool) {
    let _ = write!(out, "- **{}**: ", result.key);
    match result.dataset {
        DatasetKind::Courses => {
            out.push_str(&result.title);
            if result.course_level != CourseLevel::Unknown {
                let _ = write!(out, " ({})", result.course_level);
            }
            if let Some(major) = result
                .subject_prefix
                .as_deref()
                .and_then(MajorMapper::major_for_prefix)
            {
                let _ = write!(out, " [{major}]");
            }
        },
        DatasetKind::Moocs => {
            let _ = write!(
                out,
                "[Course Link]({})",
                result.link.as_deref().unwrap_or_default()
            );
        },
    }
    let _ = write!(
        out,
        " _{}_ (Score: {:.2})",
        result.match_type.label(),
        result.score
    );
    if with_skills && result.has_matching_skills() {
        let _ = write!(out, " - Matches: {}", result.matching_skills.join(", "));
    }
    out.push('\n');
}
