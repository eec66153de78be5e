//! Post-fusion filtering and seniority re-weighting.

use crate::config::RankingPolicy;
use crate::models::{CourseLevel, DatasetKind, SearchResult, Seniority, WeightedSkill};

/// Discount for strong results outside the technical prefixes.
const OFF_DOMAIN_DISCOUNT: f64 = 0.9;
/// Scores above this are discounted rather than dropped.
const OFF_DOMAIN_KEEP_ABOVE: f64 = 0.85;
/// Unmatched scores below this are dropped.
const OFF_DOMAIN_DROP_BELOW: f64 = 0.8;
/// Senior roles on undergraduate courses.
const SENIOR_UNDERGRAD_FACTOR: f64 = 0.85;
/// Entry roles on graduate courses.
const ENTRY_GRADUATE_FACTOR: f64 = 0.95;
/// MOOC scores at or above this skip the specific-technology check.
const MOOC_STRONG_SCORE: f64 = 0.82;
/// MOOCs failing the specific-technology check are dropped below this.
const MOOC_DROP_BELOW: f64 = 0.75;
/// Discount for MOOCs that fail the check but are kept.
const MOOC_DISCOUNT: f64 = 0.9;
/// Extra factor when an explicit seniority disagrees with the course level.
const EXPLICIT_LEVEL_FACTOR: f64 = 0.9;

/// Applies domain and seniority policies to fused results.
#[derive(Debug, Clone, Copy)]
pub struct ResultFilter<'a> {
    policy: &'a RankingPolicy,
}

impl<'a> ResultFilter<'a> {
    /// Creates a filter using the given ranking policy.
    #[must_use]
    pub const fn new(policy: &'a RankingPolicy) -> Self {
        Self { policy }
    }

    /// Filters and re-weights results for a job.
    ///
    /// Seniority for the level adjustment is inferred from the job title.
    /// When `explicit` is given, a further discount applies to graduate
    /// courses for entry roles and undergraduate courses for senior roles.
    /// Scores stay within `[0, 1]` and order is preserved.
    #[must_use]
    pub fn filter(
        &self,
        results: Vec<SearchResult>,
        dataset: DatasetKind,
        skills: &[WeightedSkill],
        job_title: &str,
        explicit: Option<Seniority>,
    ) -> Vec<SearchResult> {
        let before = results.len();
        let inferred = Seniority::infer_from_title(job_title);
        let skill_names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();

        let filtered: Vec<SearchResult> = match dataset {
            DatasetKind::Courses => {
                let has_tech = self.policy.has_tech_skill(&skill_names);
                results
                    .into_iter()
                    .filter_map(|result| self.filter_course(result, has_tech, inferred))
                    .collect()
            },
            DatasetKind::Moocs => {
                let targets: Vec<&str> = skill_names
                    .iter()
                    .copied()
                    .filter(|name| {
                        self.policy
                            .specific_mooc_skills
                            .iter()
                            .any(|s| s.eq_ignore_ascii_case(name))
                    })
                    .collect();
                results
                    .into_iter()
                    .filter_map(|result| Self::filter_mooc(result, &targets))
                    .collect()
            },
        };

        let filtered: Vec<SearchResult> = filtered
            .into_iter()
            .map(|mut result| {
                if let Some(seniority) = explicit {
                    Self::apply_explicit_seniority(&mut result, seniority);
                }
                result.clamp_score();
                result
            })
            .collect();

        tracing::debug!(
            dataset = dataset.as_str(),
            seniority = inferred.as_str(),
            before,
            after = filtered.len(),
            "Filtered results"
        );
        filtered
    }

    fn filter_course(
        &self,
        mut result: SearchResult,
        has_tech: bool,
        seniority: Seniority,
    ) -> Option<SearchResult> {
        let tech_prefix = result
            .subject_prefix
            .as_deref()
            .is_some_and(|prefix| self.policy.is_tech_prefix(prefix));

        if has_tech && !tech_prefix {
            if result.score > OFF_DOMAIN_KEEP_ABOVE {
                result.score *= OFF_DOMAIN_DISCOUNT;
            } else if result.score < OFF_DOMAIN_DROP_BELOW && !result.has_matching_skills() {
                return None;
            }
        }

        match (seniority, result.course_level) {
            (Seniority::Senior, CourseLevel::Undergraduate) => {
                result.score *= SENIOR_UNDERGRAD_FACTOR;
            },
            (Seniority::Entry, CourseLevel::Graduate) => {
                result.score *= ENTRY_GRADUATE_FACTOR;
            },
            _ => {},
        }
        Some(result)
    }

    fn filter_mooc(mut result: SearchResult, targets: &[&str]) -> Option<SearchResult> {
        if targets.is_empty() {
            return Some(result);
        }

        let title = result.title.to_lowercase();
        let named = targets.iter().any(|t| title.contains(&t.to_lowercase()));
        let skill_hits_target = result
            .matching_skills
            .iter()
            .any(|skill| targets.iter().any(|t| t.contains(&skill.to_lowercase())));

        if !named && result.score < MOOC_STRONG_SCORE && !skill_hits_target {
            if result.score < MOOC_DROP_BELOW {
                return None;
            }
            result.score *= MOOC_DISCOUNT;
        }
        Some(result)
    }

    fn apply_explicit_seniority(result: &mut SearchResult, seniority: Seniority) {
        match (seniority, result.course_level) {
            (Seniority::Entry, CourseLevel::Graduate)
            | (Seniority::Senior, CourseLevel::Undergraduate) => {
                result.score *= EXPLICIT_LEVEL_FACTOR;
            },
            _ => {},
        }
    }
}
