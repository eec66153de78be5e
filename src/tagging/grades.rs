//! Grade distribution extraction.

use super::patterns::{GRADE_PATTERNS, GradeStyle, TEAM_PROJECT, TOTAL_POINTS};
use crate::config::TaggingConfig;
use crate::models::{GradeComponent, GradeDistribution};
use std::collections::HashSet;

const DEFAULT_TOTAL: f64 = 100.0;

/// Parses grading-weight text into a percentage per component.
///
/// Figures are accumulated, so a distribution can exceed 100% when several
/// patterns match the same grading line. A figure is credited at most once
/// per component, but every component named before it gets the figure. The
/// team-project pass always credits projects.
#[derive(Debug, Clone)]
pub struct GradeDistributionExtractor {
    /// Category lexicons in categorization priority order.
    categories: Vec<(GradeComponent, Vec<String>)>,
}

impl GradeDistributionExtractor {
    /// Creates an extractor using the tagging lexicons for categorization.
    #[must_use]
    pub fn new(config: &TaggingConfig) -> Self {
        Self {
            categories: vec![
                (GradeComponent::Project, config.project.keywords.clone()),
                (GradeComponent::Exam, config.exam.keywords.clone()),
                (GradeComponent::Assignment, config.assignment.keywords.clone()),
                (GradeComponent::Attendance, config.attendance.keywords.clone()),
            ],
        }
    }

    /// Extracts the grade distribution from syllabus text.
    #[must_use]
    pub fn extract(&self, text: &str) -> GradeDistribution {
        let mut distribution = GradeDistribution::new();
        let total = total_points(text);
        let mut counted: HashSet<(GradeComponent, usize, usize)> = HashSet::new();

        for pattern in GRADE_PATTERNS.iter() {
            for caps in pattern.regex.captures_iter(text) {
                let (Some(component), Some(figure)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let Some(bucket) = self.categorize(&component.as_str().to_lowercase()) else {
                    continue;
                };
                if !counted.insert((bucket, figure.start(), figure.end())) {
                    continue;
                }
                let Ok(value) = figure.as_str().parse::<f64>() else {
                    continue;
                };
                let percentage = if pattern.style == GradeStyle::Points
                    || (total - DEFAULT_TOTAL).abs() > f64::EPSILON
                {
                    value / total * 100.0
                } else {
                    value
                };
                distribution.add(bucket, percentage);
            }
        }

        if let Some(value) = TEAM_PROJECT
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            let percentage = if (total - DEFAULT_TOTAL).abs() > f64::EPSILON {
                value / total * 100.0
            } else {
                value
            };
            distribution.add(GradeComponent::Project, percentage);
        }

        distribution
    }

    /// First category whose lexicon has a keyword contained in the component.
    fn categorize(&self, component: &str) -> Option<GradeComponent> {
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| component.contains(kw.as_str())))
            .map(|(bucket, _)| *bucket)
    }
}

/// Total points for conversion: first number after "total", default 100.
fn total_points(text: &str) -> f64 {
    TOTAL_POINTS
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|total| *total > 0.0)
        .unwrap_or(DEFAULT_TOTAL)
}
