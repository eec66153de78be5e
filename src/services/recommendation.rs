//! Job-to-course recommendation service.
//!
//! Runs the full pipeline for a job posting: skill extraction and weighting,
//! relevant-major pre-filtering, direct and semantic search per dataset,
//! fusion, filtering and grouping.

use crate::catalog::{Catalog, CatalogCache};
use crate::config::{CoursematchConfig, RankingPolicy};
use crate::embedding::Embedder;
use crate::llm::{LlmProvider, build_provider};
use crate::models::{
    CatalogEntry, CourseRecord, DatasetKind, RecommendationOutcome, Recommendations,
    SearchResult, Seniority, SkillGroup, WeightedSkill,
};
use crate::search::{DirectSearch, ResultFilter, SemanticSearch, SkillMatcher, combine};
use crate::skills::{MajorMapper, SkillExtractor, weight_skills};
use crate::storage::{IndexReport, MemoryVectorIndex, VectorIndex, refresh_index};
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

/// Reason given when no skills could be found for a job.
pub const NO_SKILLS_REASON: &str = "No skills could be extracted from the job description. \
                                    Please try again with a more detailed description.";

/// Reason given when the job description is blank.
const EMPTY_DESCRIPTION_REASON: &str = "Job description cannot be empty.";

/// A request for course recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    /// Job title.
    pub job_title: String,
    /// Free-text job description.
    pub job_description: String,
    /// Optional comma-separated skills supplied by the user.
    pub user_skills: Option<String>,
    /// Explicit seniority; inferred from the title when absent.
    pub seniority: Option<Seniority>,
    /// Whether catalog courses outside the relevant majors are removed.
    pub filter_by_major: bool,
}

impl RecommendationRequest {
    /// Creates a request with major filtering enabled.
    #[must_use]
    pub fn new(job_title: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            job_description: job_description.into(),
            user_skills: None,
            seniority: None,
            filter_by_major: true,
        }
    }

    /// Sets the user-supplied skills.
    #[must_use]
    pub fn with_user_skills(mut self, skills: impl Into<String>) -> Self {
        self.user_skills = Some(skills.into());
        self
    }

    /// Sets an explicit seniority.
    #[must_use]
    pub const fn with_seniority(mut self, seniority: Seniority) -> Self {
        self.seniority = Some(seniority);
        self
    }

    /// Enables or disables the relevant-major pre-filter.
    #[must_use]
    pub const fn with_major_filter(mut self, enabled: bool) -> Self {
        self.filter_by_major = enabled;
        self
    }
}

/// Service producing course recommendations for job postings.
pub struct RecommendationService {
    catalog: Arc<CatalogCache>,
    policy: Arc<RankingPolicy>,
    extractor: SkillExtractor,
    embedder: Arc<dyn Embedder>,
    course_index: Arc<dyn VectorIndex>,
    mooc_index: Arc<dyn VectorIndex>,
}

impl RecommendationService {
    /// Creates a service with the default ranking policy and the heuristic
    /// skill extraction chain.
    #[must_use]
    pub fn new(
        catalog: Arc<CatalogCache>,
        embedder: Arc<dyn Embedder>,
        course_index: Arc<dyn VectorIndex>,
        mooc_index: Arc<dyn VectorIndex>,
    ) -> Self {
        let policy = RankingPolicy::default();
        let extractor = SkillExtractor::standard(None, policy.max_skills);
        Self {
            catalog,
            policy: Arc::new(policy),
            extractor,
            embedder,
            course_index,
            mooc_index,
        }
    }

    /// Builds a service from configuration.
    ///
    /// Vector indexes are opened from `courses.json` and `moocs.json` in the
    /// configured index directory; missing files start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing index file cannot be read or was
    /// built with different dimensions.
    pub fn from_config(config: &CoursematchConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let dimensions = embedder.dimensions();
        let course_index = MemoryVectorIndex::open(
            Self::index_path(config, DatasetKind::Courses),
            dimensions,
        )?;
        let mooc_index =
            MemoryVectorIndex::open(Self::index_path(config, DatasetKind::Moocs), dimensions)?;

        let service = Self::new(
            Arc::new(CatalogCache::new(config.data.clone())),
            embedder,
            Arc::new(course_index),
            Arc::new(mooc_index),
        )
        .with_policy(config.ranking.clone());

        Ok(match build_provider(&config.llm) {
            Some(provider) => service.with_llm(provider),
            None => service,
        })
    }

    /// Path of the persisted index for a dataset.
    #[must_use]
    pub fn index_path(config: &CoursematchConfig, dataset: DatasetKind) -> std::path::PathBuf {
        config
            .data
            .index_dir
            .join(format!("{}.json", dataset.as_str()))
    }

    /// Replaces the ranking policy.
    ///
    /// The skill extractor is rebuilt only if its limit changed.
    #[must_use]
    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        if policy.max_skills != self.policy.max_skills {
            self.extractor = SkillExtractor::standard(None, policy.max_skills);
        }
        self.policy = Arc::new(policy);
        self
    }

    /// Puts an LLM in front of the heuristic extraction strategies.
    #[must_use]
    pub fn with_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.extractor = SkillExtractor::standard(Some(provider), self.policy.max_skills);
        self
    }

    /// Replaces the skill extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: SkillExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Returns the ranking policy.
    #[must_use]
    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Returns the catalog cache.
    #[must_use]
    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// Recommends catalog courses and MOOCs for a job posting.
    ///
    /// A blank description, or one from which no skills can be extracted,
    /// yields [`RecommendationOutcome::Rejected`]. Semantic search failures
    /// degrade to direct results only.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    #[instrument(
        skip(self, request),
        fields(operation = "recommend_courses", job_title = %request.job_title)
    )]
    pub fn recommend_courses(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationOutcome> {
        if request.job_description.trim().is_empty() {
            return Ok(RecommendationOutcome::Rejected {
                reason: EMPTY_DESCRIPTION_REASON.to_string(),
            });
        }

        let skills = self.extractor.extract(
            &request.job_title,
            &request.job_description,
            request.user_skills.as_deref(),
        );
        if skills.is_empty() {
            tracing::debug!("No skills extracted");
            return Ok(RecommendationOutcome::Rejected {
                reason: NO_SKILLS_REASON.to_string(),
            });
        }

        let weighted = weight_skills(&skills, &request.job_title, &request.job_description);
        let relevant_majors = MajorMapper::relevant_majors(&request.job_title);
        tracing::debug!(
            skills = weighted.len(),
            majors = relevant_majors.len(),
            "Prepared job profile"
        );

        let catalog = self.catalog.get()?;
        let courses = Self::candidate_courses(&catalog, &relevant_majors, request.filter_by_major);
        let matcher = SkillMatcher::new(&weighted);

        let mut course_results = self.search_dataset(
            courses.as_slice(),
            &matcher,
            self.course_index.as_ref(),
            request,
        );
        let mut mooc_results = self.search_dataset(
            catalog.moocs.as_slice(),
            &matcher,
            self.mooc_index.as_ref(),
            request,
        );

        sort_by_score(&mut course_results);
        sort_by_score(&mut mooc_results);

        let top = self.policy.top_results;
        let top_courses: Vec<SearchResult> = course_results.iter().take(top).cloned().collect();
        let top_moocs: Vec<SearchResult> = mooc_results.iter().take(top).cloned().collect();
        let skill_groups = self.group_by_skill(
            &weighted,
            &course_results,
            &mooc_results,
            &top_courses,
            &top_moocs,
        );

        tracing::debug!(
            courses = course_results.len(),
            moocs = mooc_results.len(),
            groups = skill_groups.len(),
            "Recommendations ready"
        );

        Ok(RecommendationOutcome::Recommended(Recommendations {
            job_title: request.job_title.clone(),
            seniority: request
                .seniority
                .unwrap_or_else(|| Seniority::infer_from_title(&request.job_title)),
            relevant_majors,
            skills: weighted,
            courses: course_results,
            moocs: mooc_results,
            top_courses,
            top_moocs,
            skill_groups,
        }))
    }

    /// Rebuilds and persists the vector index for a dataset from the
    /// current catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or embedding or the
    /// index write fails.
    #[instrument(skip(self), fields(operation = "rebuild_index"))]
    pub fn rebuild_index(&self, dataset: DatasetKind) -> Result<IndexReport> {
        let catalog = self.catalog.get()?;
        let embedder = self.embedder.as_ref();
        let (report, index) = match dataset {
            DatasetKind::Courses => (
                refresh_index(&catalog.courses, embedder, self.course_index.as_ref())?,
                &self.course_index,
            ),
            DatasetKind::Moocs => (
                refresh_index(&catalog.moocs, embedder, self.mooc_index.as_ref())?,
                &self.mooc_index,
            ),
        };
        index.persist()?;
        Ok(report)
    }

    /// Catalog courses that survive the relevant-major pre-filter.
    fn candidate_courses(
        catalog: &Catalog,
        relevant_majors: &[String],
        filter_by_major: bool,
    ) -> Vec<CourseRecord> {
        if !filter_by_major {
            return catalog.courses.clone();
        }
        let kept: Vec<CourseRecord> = catalog
            .courses
            .iter()
            .filter(|course| MajorMapper::is_relevant_prefix(&course.subject, relevant_majors))
            .cloned()
            .collect();
        tracing::debug!(
            before = catalog.courses.len(),
            after = kept.len(),
            "Applied major filter"
        );
        kept
    }

    /// Direct + semantic search, fusion and filtering for one dataset.
    fn search_dataset<R: CatalogEntry>(
        &self,
        records: &[R],
        matcher: &SkillMatcher,
        index: &dyn VectorIndex,
        request: &RecommendationRequest,
    ) -> Vec<SearchResult> {
        let direct = DirectSearch::new(&self.policy).search(records, matcher);
        let semantic = SemanticSearch::new(&self.policy, self.embedder.as_ref(), index).search(
            records,
            matcher,
            &request.job_title,
        );
        tracing::debug!(
            dataset = R::KIND.as_str(),
            direct = direct.len(),
            semantic = semantic.len(),
            "Search complete"
        );

        let skills: Vec<WeightedSkill> = matcher.skills().cloned().collect();
        ResultFilter::new(&self.policy).filter(
            combine(direct, semantic),
            R::KIND,
            &skills,
            &request.job_title,
            request.seniority,
        )
    }

    /// Builds per-skill groups of results not listed in the top lists.
    ///
    /// Inputs are expected sorted by descending score. Items are listed at
    /// most once across all groups.
    fn group_by_skill(
        &self,
        skills: &[WeightedSkill],
        courses: &[SearchResult],
        moocs: &[SearchResult],
        top_courses: &[SearchResult],
        top_moocs: &[SearchResult],
    ) -> Vec<SkillGroup> {
        let mut listed_courses: HashSet<String> =
            top_courses.iter().map(|r| r.key.clone()).collect();
        let mut listed_moocs: HashSet<String> = top_moocs.iter().map(|r| r.key.clone()).collect();
        let per_skill = self.policy.per_skill_results;

        skills
            .iter()
            .take(self.policy.skill_groups)
            .map(|skill| SkillGroup {
                skill: skill.name.clone(),
                courses: pick_for_skill(courses, &skill.name, &mut listed_courses, per_skill),
                moocs: pick_for_skill(moocs, &skill.name, &mut listed_moocs, per_skill),
            })
            .filter(|group| !group.is_empty())
            .collect()
    }
}

/// Stable sort by descending score.
fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Picks up to `limit` unlisted results matching a skill and marks them listed.
fn pick_for_skill(
    results: &[SearchResult],
    skill: &str,
    listed: &mut HashSet<String>,
    limit: usize,
) -> Vec<SearchResult> {
    let mut picked = Vec::new();
    for result in results {
        if picked.len() >= limit {
            break;
        }
        if result.matching_skills.iter().any(|s| s == skill) && listed.insert(result.key.clone())
        {
            picked.push(result.clone());
        }
    }
    picked
}

impl std::fmt::Debug for RecommendationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationService")
            .field("catalog_loaded", &self.catalog.is_loaded())
            .field("extractor", &self.extractor.strategy_names())
            .field("embedder_dimensions", &self.embedder.dimensions())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashedEmbedder;
    use crate::models::{MatchType, MoocRecord};
    use crate::storage::index_catalog;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                CourseRecord::new(
                    "CS 4641",
                    "Machine Learning",
                    "Supervised and unsupervised machine learning with Python.",
                ),
                CourseRecord::new(
                    "CS 4400",
                    "Introduction to Database Systems",
                    "Relational databases, SQL queries and schema design.",
                ),
                CourseRecord::new(
                    "MATH 3670",
                    "Probability and Statistics",
                    "Statistics and probability with applications in data analysis.",
                ),
                CourseRecord::new(
                    "MGT 3000",
                    "Financial Accounting",
                    "Python spreadsheets, Python macros and Python reports for accountants.",
                ),
            ],
            vec![
                MoocRecord::new(
                    "Python for Everybody",
                    "Learn Python programming from scratch.",
                    "https://example.org/py4e",
                ),
                MoocRecord::new(
                    "Watercolor Basics",
                    "Painting landscapes with watercolor.",
                    "https://example.org/paint",
                ),
            ],
        )
    }

    fn service() -> RecommendationService {
        let dims = 64;
        RecommendationService::new(
            Arc::new(CatalogCache::from_catalog(catalog())),
            Arc::new(HashedEmbedder::with_dimensions(dims)),
            Arc::new(MemoryVectorIndex::new(dims)),
            Arc::new(MemoryVectorIndex::new(dims)),
        )
    }

    fn recommended(outcome: RecommendationOutcome) -> Recommendations {
        outcome.recommendations().cloned().unwrap()
    }

    #[test]
    fn test_blank_description_rejected() {
        let outcome = service()
            .recommend_courses(&RecommendationRequest::new("Data Scientist", "   "))
            .unwrap();
        assert!(matches!(outcome, RecommendationOutcome::Rejected { .. }));
    }

    #[test]
    fn test_no_skills_rejected() {
        let outcome = service()
            .recommend_courses(&RecommendationRequest::new("Chef", "Cook tasty food."))
            .unwrap();
        assert_eq!(
            outcome,
            RecommendationOutcome::Rejected {
                reason: NO_SKILLS_REASON.to_string()
            }
        );
    }

    #[test]
    fn test_data_scientist_direct_only() {
        let request = RecommendationRequest::new(
            "Data Scientist",
            "Python, machine learning and SQL for analytics.",
        );
        let recs = recommended(service().recommend_courses(&request).unwrap());

        assert_eq!(recs.seniority, Seniority::Entry);
        assert!(!recs.courses.is_empty());
        assert!(recs.courses.iter().all(|r| r.match_type == MatchType::Direct));
        assert!(recs.courses.iter().all(|r| r.score >= 0.65 && r.score <= 1.0));
        assert!(recs.courses.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(recs.courses.iter().any(|r| r.key == "CS 4641"));
        // MGT is not a Data Scientist major.
        assert!(recs.courses.iter().all(|r| r.key != "MGT 3000"));
        assert!(recs.moocs.iter().any(|r| r.key == "Python for Everybody"));
        assert!(recs.moocs.iter().all(|r| r.key != "Watercolor Basics"));
    }

    #[test]
    fn test_major_filter_can_be_disabled() {
        let request = RecommendationRequest::new("Data Scientist", "Python and SQL.")
            .with_major_filter(false);
        let recs = recommended(service().recommend_courses(&request).unwrap());
        assert!(recs.courses.iter().any(|r| r.key == "MGT 3000"));
    }

    #[test]
    fn test_explicit_seniority_reported() {
        let request = RecommendationRequest::new("Data Scientist", "Python and SQL.")
            .with_seniority(Seniority::Senior);
        let recs = recommended(service().recommend_courses(&request).unwrap());
        assert_eq!(recs.seniority, Seniority::Senior);
    }

    #[test]
    fn test_semantic_results_after_indexing() {
        let service = service();
        let report = service.rebuild_index(DatasetKind::Courses).unwrap();
        assert_eq!(report.indexed, 4);
        index_catalog(
            &catalog().moocs,
            service.embedder.as_ref(),
            service.mooc_index.as_ref(),
        )
        .unwrap();

        let request = RecommendationRequest::new(
            "Data Scientist",
            "Python, machine learning and SQL for analytics.",
        );
        let recs = recommended(service.recommend_courses(&request).unwrap());
        assert!(recs.courses.iter().all(|r| r.score <= 1.0));
        assert!(
            recs.courses
                .iter()
                .any(|r| r.match_type != MatchType::Direct)
        );
    }

    #[test]
    fn test_top_lists_and_groups_do_not_overlap() {
        let policy = RankingPolicy {
            top_results: 1,
            ..RankingPolicy::default()
        };
        let request = RecommendationRequest::new(
            "Data Scientist",
            "Python, machine learning and SQL for analytics.",
        );
        let recs = recommended(
            service()
                .with_policy(policy)
                .recommend_courses(&request)
                .unwrap(),
        );

        assert_eq!(recs.top_courses.len(), 1);
        let mut seen: HashSet<&str> = recs.top_courses.iter().map(|r| r.key.as_str()).collect();
        for group in &recs.skill_groups {
            assert!(!group.is_empty());
            assert!(group.courses.len() <= 3);
            for result in &group.courses {
                assert!(result.matching_skills.contains(&group.skill));
                assert!(seen.insert(result.key.as_str()));
            }
        }
    }

    #[test]
    fn test_pick_for_skill_respects_limit_and_listed() {
        let make = |key: &str, score: f64| SearchResult {
            key: key.to_string(),
            title: key.to_string(),
            dataset: DatasetKind::Moocs,
            score,
            match_type: MatchType::Direct,
            matching_skills: vec!["python".to_string()],
            course_level: crate::models::CourseLevel::Unknown,
            subject_prefix: None,
            link: None,
        };
        let results = vec![make("a", 0.9), make("b", 0.8), make("c", 0.7), make("d", 0.6)];
        let mut listed: HashSet<String> = HashSet::from(["a".to_string()]);

        let picked = pick_for_skill(&results, "python", &mut listed, 2);
        let keys: Vec<_> = picked.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
        assert!(pick_for_skill(&results, "sql", &mut listed, 3).is_empty());
    }
}
