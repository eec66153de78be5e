//! Keyword retrieval over catalog text fields.

use super::SkillMatcher;
use crate::config::RankingPolicy;
use crate::models::{CatalogEntry, MatchType, SearchResult};

/// Base score per unit of skill weight.
const BASE_FACTOR: f64 = 0.4;
/// Title bonus for a whole-word match.
const TITLE_WORD_BONUS: f64 = 0.4;
/// Title bonus for a substring match.
const TITLE_SUBSTRING_BONUS: f64 = 0.2;
/// Bonus per body occurrence.
const BODY_OCCURRENCE_BONUS: f64 = 0.1;
/// Cap on the body bonus.
const MAX_BODY_BONUS: f64 = 0.3;

/// Direct (keyword) search.
///
/// Produces one result per matching (skill, record) pair; duplicates are
/// merged later by [`combine`](super::combine).
#[derive(Debug, Clone, Copy)]
pub struct DirectSearch<'a> {
    policy: &'a RankingPolicy,
}

impl<'a> DirectSearch<'a> {
    /// Creates a direct search using the given ranking policy.
    #[must_use]
    pub const fn new(policy: &'a RankingPolicy) -> Self {
        Self { policy }
    }

    /// Searches the records for the matcher's skills.
    #[must_use]
    pub fn search<R: CatalogEntry>(
        &self,
        records: &[R],
        matcher: &SkillMatcher,
    ) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for (skill, regex) in matcher.patterns() {
            let skill_lower = skill.name.to_lowercase();
            for record in records {
                let title = record.title();
                let body = record.body();
                let title_match = regex.is_match(title);
                if !title_match && !regex.is_match(body) {
                    continue;
                }

                let weight = skill.weight;
                let mut score = BASE_FACTOR * weight;
                score += self
                    .policy
                    .direct_domain_boost(&skill_lower, record.subject_prefix());

                if title_match {
                    score += TITLE_WORD_BONUS * weight;
                } else if title.to_lowercase().contains(&skill_lower) {
                    score += TITLE_SUBSTRING_BONUS * weight;
                }

                #[allow(clippy::cast_precision_loss)]
                let occurrences = regex.find_iter(body).count() as f64;
                score += (BODY_OCCURRENCE_BONUS * occurrences).min(MAX_BODY_BONUS) * weight;

                if score >= self.policy.direct_min_score {
                    results.push(SearchResult::from_entry(
                        record,
                        score,
                        MatchType::Direct,
                        vec![skill.name.clone()],
                    ));
                }
            }
        }

        tracing::debug!(
            dataset = R::KIND.as_str(),
            results = results.len(),
            "Direct search complete"
        );
        metrics::counter!("coursematch_search_results_total", "source" => "direct")
            .increment(results.len() as u64);
        results
    }
}
