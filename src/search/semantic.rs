//! Embedding-based retrieval with skill-weighted re-scoring.

use super::SkillMatcher;
use crate::config::RankingPolicy;
use crate::embedding::Embedder;
use crate::models::{CatalogEntry, MatchType, SearchResult, WeightedSkill};
use crate::storage::{Neighbor, VectorIndex};
use std::collections::HashMap;

/// Skills named in the query text.
const QUERY_SKILLS: usize = 5;
/// Skills that may add a context phrase to the query.
const CONTEXT_SKILLS: usize = 3;
/// Cap on the average-weight bonus.
const MAX_AVERAGE_BONUS: f64 = 0.15;

/// Canned context phrase for a skill, keyed by substring.
fn context_phrase(skill: &str) -> Option<&'static str> {
    let skill = skill.to_lowercase();
    if skill.contains("python") {
        Some("Python programming language courses")
    } else if skill.contains("machine learning") || skill.contains("ai") {
        Some("Machine learning and artificial intelligence courses")
    } else if skill.contains("data") && (skill.contains("science") || skill.contains("analysis")) {
        Some("Data science and analysis courses")
    } else if skill.contains("cloud") || skill.contains("aws") || skill.contains("azure") {
        Some("Cloud computing and infrastructure courses")
    } else if skill.contains("web") || skill.contains("frontend") || skill.contains("javascript")
    {
        Some("Web development courses")
    } else {
        None
    }
}

/// Builds the natural-language query for a job.
///
/// `skills` are expected heaviest first.
#[must_use]
pub fn build_semantic_query(job_title: &str, skills: &[WeightedSkill]) -> String {
    let primary: Vec<&str> = skills
        .iter()
        .take(QUERY_SKILLS)
        .map(|s| s.name.as_str())
        .collect();

    let mut parts = vec![
        format!("Courses for {job_title}"),
        format!("Skills needed: {}", primary.join(", ")),
    ];
    parts.extend(
        primary
            .iter()
            .take(CONTEXT_SKILLS)
            .filter_map(|skill| context_phrase(skill))
            .map(str::to_string),
    );
    parts.join(" ")
}

/// Number of neighbours to request for a skill count.
#[must_use]
pub fn neighbor_count(skill_count: usize) -> usize {
    (skill_count * 3).clamp(7, 20)
}

/// Semantic (vector) search.
///
/// Collaborator failures degrade to an empty result list.
#[derive(Clone, Copy)]
pub struct SemanticSearch<'a> {
    policy: &'a RankingPolicy,
    embedder: &'a dyn Embedder,
    index: &'a dyn VectorIndex,
}

impl<'a> SemanticSearch<'a> {
    /// Creates a semantic search over an index.
    #[must_use]
    pub const fn new(
        policy: &'a RankingPolicy,
        embedder: &'a dyn Embedder,
        index: &'a dyn VectorIndex,
    ) -> Self {
        Self {
            policy,
            embedder,
            index,
        }
    }

    /// Searches the index and scores neighbours that belong to `records`.
    ///
    /// Neighbours keep their original rank even when earlier neighbours are
    /// not among the records.
    #[must_use]
    pub fn search<R: CatalogEntry>(
        &self,
        records: &[R],
        matcher: &SkillMatcher,
        job_title: &str,
    ) -> Vec<SearchResult> {
        if records.is_empty() {
            return Vec::new();
        }

        let skills: Vec<WeightedSkill> = matcher.skills().cloned().collect();
        let query = build_semantic_query(job_title, &skills);
        let k = neighbor_count(matcher.len());

        let neighbors = match self.query(&query, k) {
            Ok(neighbors) => neighbors,
            Err(e) => {
                tracing::warn!(
                    dataset = R::KIND.as_str(),
                    error = %e,
                    "Semantic search unavailable, continuing with direct results"
                );
                metrics::counter!(
                    "coursematch_semantic_degraded_total",
                    "dataset" => R::KIND.as_str()
                )
                .increment(1);
                return Vec::new();
            },
        };

        let by_key: HashMap<&str, &R> = records.iter().map(|r| (r.key(), r)).collect();
        let mut results = Vec::new();

        for (rank, neighbor) in neighbors.iter().enumerate() {
            let key = neighbor
                .metadata
                .get("key")
                .map_or(neighbor.id.as_str(), String::as_str);
            let Some(record) = by_key.get(key) else {
                continue;
            };

            #[allow(clippy::cast_precision_loss)]
            let mut score =
                self.policy.semantic_base_score - self.policy.semantic_rank_decay * rank as f64;

            let matched = matcher.matching(&neighbor.document);
            let matched_names: Vec<String> = matched.iter().map(|s| s.name.clone()).collect();
            if !matched.is_empty() {
                let total_weight: f64 = matched.iter().map(|s| s.weight).sum();
                score += self.policy.semantic_skill_bonus * total_weight;
                #[allow(clippy::cast_precision_loss)]
                let average = total_weight / matched.len() as f64;
                score += (average * 0.1).min(MAX_AVERAGE_BONUS);
            }
            score += self
                .policy
                .semantic_domain_boost(&matched_names, record.subject_prefix());

            let threshold = if matched.is_empty() {
                self.policy.semantic_min_score_unmatched
            } else {
                self.policy.semantic_min_score_matched
            };
            if score >= threshold {
                results.push(SearchResult::from_entry(
                    *record,
                    score,
                    MatchType::Semantic,
                    matched_names,
                ));
            }
        }

        tracing::debug!(
            dataset = R::KIND.as_str(),
            neighbors = neighbors.len(),
            results = results.len(),
            "Semantic search complete"
        );
        metrics::counter!("coursematch_search_results_total", "source" => "semantic")
            .increment(results.len() as u64);
        results
    }

    fn query(&self, query: &str, k: usize) -> crate::Result<Vec<Neighbor>> {
        let vector = self.embedder.embed(query)?;
        self.index.query_nearest(&vector, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashedEmbedder;
    use crate::models::{CourseRecord, MoocRecord};
    use crate::storage::{MemoryVectorIndex, Metadata, index_catalog};
    use crate::{Error, Result};
    use test_case::test_case;

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn dimensions(&self) -> usize {
            8
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(Error::OperationFailed {
                operation: "embed".to_string(),
                cause: "model offline".to_string(),
            })
        }
    }

    /// Index whose single vector matches any query in the first dimension.
    fn fixed_index(entries: &[(&str, &str)]) -> MemoryVectorIndex {
        let index = MemoryVectorIndex::new(DIMS);
        for (key, document) in entries {
            let mut metadata = Metadata::new();
            metadata.insert("key".to_string(), (*key).to_string());
            index
                .add_batch(
                    &[(*key).to_string()],
                    &[vec![1.0; DIMS]],
                    &[(*document).to_string()],
                    &[metadata],
                )
                .unwrap();
        }
        index
    }

    const DIMS: usize = 8;

    #[test]
    fn test_query_construction() {
        let skills = vec![
            WeightedSkill::new("python", 1.5),
            WeightedSkill::new("machine learning", 1.2),
            WeightedSkill::new("sql", 1.0),
            WeightedSkill::new("aws", 1.0),
        ];
        assert_eq!(
            build_semantic_query("Data Scientist", &skills),
            "Courses for Data Scientist Skills needed: python, machine learning, sql, aws \
             Python programming language courses Machine learning and artificial intelligence courses"
        );
    }

    #[test_case(0 => 7)]
    #[test_case(3 => 9)]
    #[test_case(10 => 20)]
    fn test_neighbor_count(skills: usize) -> usize {
        neighbor_count(skills)
    }

    #[test]
    fn test_scoring_with_matched_skills() {
        let policy = RankingPolicy::default();
        let embedder = HashedEmbedder::with_dimensions(DIMS);
        let index = fixed_index(&[("CS 4641", "Machine learning with python")]);
        let records = vec![CourseRecord::new("CS 4641", "Machine Learning", "")];
        let matcher = SkillMatcher::new(&[WeightedSkill::new("python", 1.0)]);

        let results =
            SemanticSearch::new(&policy, &embedder, &index).search(&records, &matcher, "Analyst");
        assert_eq!(results.len(), 1);
        // 0.82 + 0.05 + 0.1 avg bonus + 0.15 tech domain, clamped
        assert!((results[0].score - 1.0).abs() < 1e-9);
        assert_eq!(results[0].match_type, MatchType::Semantic);
        assert_eq!(results[0].matching_skills, vec!["python"]);
    }

    #[test]
    fn test_domain_boost_counted_once_across_categories() {
        let policy = RankingPolicy {
            semantic_base_score: 0.5,
            ..RankingPolicy::default()
        };
        let embedder = HashedEmbedder::with_dimensions(DIMS);
        let index = fixed_index(&[("CS 4641", "Machine learning with python")]);
        let records = vec![CourseRecord::new("CS 4641", "Machine Learning", "")];
        let matcher = SkillMatcher::new(&[
            WeightedSkill::new("python", 1.0),
            WeightedSkill::new("machine learning", 1.0),
        ]);

        let results =
            SemanticSearch::new(&policy, &embedder, &index).search(&records, &matcher, "Analyst");
        assert_eq!(results.len(), 1);
        // 0.5 + 2 * 0.05 + 0.1 avg bonus + 0.15 domain
        assert!((results[0].score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_threshold_and_rank_decay() {
        let policy = RankingPolicy {
            semantic_min_score_unmatched: 0.75,
            ..RankingPolicy::default()
        };
        let embedder = HashedEmbedder::with_dimensions(DIMS);
        let entries: Vec<(String, String)> = (0..8)
            .map(|i| (format!("M{i}"), "General studies".to_string()))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(k, d)| (k.as_str(), d.as_str()))
            .collect();
        let index = fixed_index(&borrowed);
        let records: Vec<MoocRecord> = entries
            .iter()
            .map(|(k, d)| MoocRecord::new(k.as_str(), d.as_str(), ""))
            .collect();
        let matcher = SkillMatcher::new(&[WeightedSkill::new("rust", 1.0)]);

        let results =
            SemanticSearch::new(&policy, &embedder, &index).search(&records, &matcher, "Dev");
        // ranks 0..=3 score 0.82, 0.80, 0.78, 0.76; rank 4 falls to 0.74
        let keys: Vec<_> = results.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["M0", "M1", "M2", "M3"]);
        assert!((results[3].score - 0.76).abs() < 1e-9);
        assert!(results.iter().all(|r| r.matching_skills.is_empty()));
    }

    #[test]
    fn test_unknown_neighbors_skipped_but_rank_kept() {
        let policy = RankingPolicy::default();
        let embedder = HashedEmbedder::with_dimensions(DIMS);
        let index = fixed_index(&[("gone", "python"), ("M1", "python")]);
        let records = vec![MoocRecord::new("M1", "python", "")];
        let matcher = SkillMatcher::new(&[WeightedSkill::new("python", 1.0)]);

        let results =
            SemanticSearch::new(&policy, &embedder, &index).search(&records, &matcher, "Dev");
        assert_eq!(results.len(), 1);
        // rank 1: 0.80 + 0.05 + 0.1
        assert!((results[0].score - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_embedder_failure_degrades_to_empty() {
        let policy = RankingPolicy::default();
        let index = fixed_index(&[("M1", "python")]);
        let records = vec![MoocRecord::new("M1", "python", "")];
        let matcher = SkillMatcher::new(&[WeightedSkill::new("python", 1.0)]);

        let results = SemanticSearch::new(&policy, &FailingEmbedder, &index)
            .search(&records, &matcher, "Dev");
        assert!(results.is_empty());
    }

    #[test]
    fn test_index_dimension_mismatch_degrades_to_empty() {
        let policy = RankingPolicy::default();
        let embedder = HashedEmbedder::with_dimensions(4);
        let index = MemoryVectorIndex::new(DIMS);
        let records = vec![MoocRecord::new("M1", "python", "")];
        index_catalog(&records, &HashedEmbedder::with_dimensions(DIMS), &index).unwrap();
        let matcher = SkillMatcher::new(&[WeightedSkill::new("python", 1.0)]);

        let results =
            SemanticSearch::new(&policy, &embedder, &index).search(&records, &matcher, "Dev");
        assert!(results.is_empty());
    }
}
