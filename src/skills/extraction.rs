//! Ordered skill extraction strategies.
//!
//! Each strategy returns a possibly-empty list and never fails. The
//! [`SkillExtractor`] tries them in order and keeps the first non-empty
//! result, then merges user-supplied skills and canonicalizes the list.

use super::normalize::SkillNormalizer;
use crate::llm::{LlmProvider, parse_skill_list};
use crate::tagging::text::word_regex;
use regex::Regex;
use std::sync::Arc;

/// A single way of pulling raw skills out of a job posting.
pub trait SkillExtractionStrategy: Send + Sync {
    /// Strategy name, used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Extracts raw skill strings; empty when nothing was found.
    fn extract(&self, job_title: &str, job_description: &str) -> Vec<String>;
}

/// Asks an LLM for a comma-separated skill list.
pub struct LlmSkillExtractor {
    provider: Arc<dyn LlmProvider>,
}

impl LlmSkillExtractor {
    /// Creates an extractor backed by the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Builds the extraction prompt.
    #[must_use]
    pub fn build_prompt(job_title: &str, job_description: &str) -> String {
        format!(
            "You are a career skills expert with deep knowledge of technical fields.\n\n\
             Task: Analyze this job description for a {job_title} role and extract the top \
             7-10 most important technical skills required.\n\n\
             Job Description:\n{job_description}\n\n\
             Instructions:\n\
             1. Focus on hard technical skills, technologies, tools, languages, frameworks, \
             or domain knowledge\n\
             2. DO NOT include soft skills (communication, teamwork, etc.)\n\
             3. Extract ONLY the skills explicitly mentioned or clearly implied\n\
             4. Format your response as a comma-separated list with no other text\n\
             5. If a skill has multiple names choose the most common term\n\n\
             Example output format: Python, SQL, TensorFlow, data visualization, cloud \
             computing, Docker, CI/CD\n\n\
             Skills:"
        )
    }
}

impl SkillExtractionStrategy for LlmSkillExtractor {
    fn name(&self) -> &'static str {
        "llm"
    }

    fn extract(&self, job_title: &str, job_description: &str) -> Vec<String> {
        let prompt = Self::build_prompt(job_title, job_description);
        match self.provider.complete(&prompt) {
            Ok(response) => parse_skill_list(&response),
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "LLM skill extraction failed, trying next strategy"
                );
                Vec::new()
            },
        }
    }
}

/// Canned skill lists for a few well-known job titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFallbackExtractor;

impl SkillExtractionStrategy for TitleFallbackExtractor {
    fn name(&self) -> &'static str {
        "title"
    }

    fn extract(&self, job_title: &str, _job_description: &str) -> Vec<String> {
        let title = job_title.to_lowercase();
        let skills: &[&str] = if title.contains("data scientist") {
            &[
                "python",
                "machine learning",
                "statistics",
                "data analysis",
                "sql",
            ]
        } else if title.contains("software") && title.contains("engineer") {
            &[
                "software engineering",
                "python",
                "algorithms",
                "data structures",
                "system design",
            ]
        } else if title.contains("network") {
            &[
                "network monitoring",
                "software engineering",
                "algorithms",
                "python",
                "scalable systems",
            ]
        } else {
            &[]
        };
        skills.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Skills the keyword scan looks for.
const COMMON_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "nosql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "machine learning",
    "deep learning",
    "data analysis",
    "visualization",
    "tensorflow",
    "pytorch",
    "nlp",
    "computer vision",
    "agile",
    "cloud",
    "devops",
    "ci/cd",
    "git",
    "data science",
    "statistics",
    "r programming",
    "big data",
    "hadoop",
    "spark",
    "tableau",
    "power bi",
    "excel",
    "web development",
    "mobile development",
    "api",
    "microservices",
    "security",
    "networking",
    "linux",
    "windows",
    "databases",
    "data engineering",
    "etl",
    "analytics",
    "full stack",
];

/// Whole-word scan of the description for common technical skills.
#[derive(Debug, Clone)]
pub struct KeywordSkillExtractor {
    patterns: Vec<(String, Regex)>,
}

impl KeywordSkillExtractor {
    /// Creates the extractor with the built-in skill list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: COMMON_SKILLS
                .iter()
                .filter_map(|skill| word_regex(skill).map(|re| ((*skill).to_string(), re)))
                .collect(),
        }
    }
}

impl Default for KeywordSkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillExtractionStrategy for KeywordSkillExtractor {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn extract(&self, _job_title: &str, job_description: &str) -> Vec<String> {
        let description = job_description.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(&description))
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}

/// Runs extraction strategies in order and canonicalizes the result.
pub struct SkillExtractor {
    strategies: Vec<Box<dyn SkillExtractionStrategy>>,
    normalizer: SkillNormalizer,
    max_skills: usize,
}

impl SkillExtractor {
    /// Creates an extractor with no strategies.
    #[must_use]
    pub fn new(max_skills: usize) -> Self {
        Self {
            strategies: Vec::new(),
            normalizer: SkillNormalizer::new(),
            max_skills,
        }
    }

    /// Creates the standard chain: LLM (when available), title, keyword.
    #[must_use]
    pub fn standard(provider: Option<Arc<dyn LlmProvider>>, max_skills: usize) -> Self {
        let mut extractor = Self::new(max_skills);
        if let Some(provider) = provider {
            extractor = extractor.with_strategy(LlmSkillExtractor::new(provider));
        }
        extractor
            .with_strategy(TitleFallbackExtractor)
            .with_strategy(KeywordSkillExtractor::new())
    }

    /// Appends a strategy to the chain.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl SkillExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the configured strategies, in order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extracts canonical skills for a job posting.
    ///
    /// `user_skills` is a comma-separated list appended after the extracted
    /// skills, skipping any already present (case-insensitive).
    #[must_use]
    pub fn extract(
        &self,
        job_title: &str,
        job_description: &str,
        user_skills: Option<&str>,
    ) -> Vec<String> {
        let mut skills = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.extract(job_title, job_description);
            if !found.is_empty() {
                tracing::debug!(
                    strategy = strategy.name(),
                    count = found.len(),
                    "Extracted skills"
                );
                metrics::counter!(
                    "coursematch_skill_strategy_total",
                    "strategy" => strategy.name()
                )
                .increment(1);
                skills = found;
                break;
            }
        }

        if let Some(user_skills) = user_skills {
            for skill in user_skills.split(',').map(str::trim) {
                if skill.is_empty() {
                    continue;
                }
                let lower = skill.to_lowercase();
                if !skills.iter().any(|s| s.to_lowercase() == lower) {
                    skills.push(skill.to_string());
                }
            }
        }

        let mut normalized = self.normalizer.normalize(&skills);
        normalized.truncate(self.max_skills);
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};

    struct FixedProvider(Result<String>);

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn complete(&self, _prompt: &str) -> Result<String> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(Error::OperationFailed {
                    operation: "complete".to_string(),
                    cause: "offline".to_string(),
                }),
            }
        }
    }

    fn failing() -> Arc<dyn LlmProvider> {
        Arc::new(FixedProvider(Err(Error::InvalidInput(String::new()))))
    }

    #[test]
    fn test_llm_strategy_wins() {
        let provider: Arc<dyn LlmProvider> =
            Arc::new(FixedProvider(Ok("Python, ML, Docker".to_string())));
        let extractor = SkillExtractor::standard(Some(provider), 10);
        assert_eq!(
            extractor.extract("Data Scientist", "anything", None),
            vec!["python", "machine learning", "docker"]
        );
    }

    #[test]
    fn test_llm_failure_falls_back_to_title() {
        let extractor = SkillExtractor::standard(Some(failing()), 10);
        let skills = extractor.extract("Data Scientist", "We need SQL.", None);
        assert_eq!(skills[0], "python");
        assert!(skills.contains(&"statistics/math".to_string()));
    }

    #[test]
    fn test_keyword_fallback() {
        let extractor = SkillExtractor::standard(None, 10);
        let skills = extractor.extract("Chef", "Experience with Docker and SQL.", None);
        assert_eq!(skills, vec!["sql", "docker"]);
    }

    #[test]
    fn test_nothing_found() {
        let extractor = SkillExtractor::standard(None, 10);
        assert!(extractor.extract("Chef", "Cook tasty food.", None).is_empty());
    }

    #[test]
    fn test_user_skills_appended_without_duplicates() {
        let extractor = SkillExtractor::standard(None, 10);
        let skills = extractor.extract("Chef", "We use SQL.", Some("Rust, sql , ,ML"));
        assert_eq!(skills, vec!["sql", "rust", "machine learning"]);
    }

    #[test]
    fn test_truncated_to_max() {
        let extractor = SkillExtractor::standard(None, 2);
        let skills = extractor.extract("Chef", "python java sql docker", None);
        assert_eq!(skills, vec!["python", "java"]);
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            SkillExtractor::standard(Some(failing()), 10).strategy_names(),
            vec!["llm", "title", "keyword"]
        );
        assert_eq!(
            SkillExtractor::standard(None, 10).strategy_names(),
            vec!["title", "keyword"]
        );
    }

    #[test]
    fn test_prompt_mentions_title_and_description() {
        let prompt = LlmSkillExtractor::build_prompt("DevOps Engineer", "Kubernetes daily");
        assert!(prompt.contains("DevOps Engineer role"));
        assert!(prompt.contains("Kubernetes daily"));
        assert!(prompt.ends_with("Skills:"));
    }
}
