//! Ranking policy: domain allowlists, score thresholds and filter lists.

use serde::Deserialize;

/// A skill category with the subject prefixes it boosts.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRule {
    /// Category name, used in logs.
    pub name: String,
    /// Normalized skill names in this category.
    pub skills: Vec<String>,
    /// Subject prefixes considered in-domain.
    pub prefixes: Vec<String>,
    /// Additive boost applied by direct search.
    pub direct_boost: f64,
}

impl DomainRule {
    fn new(name: &str, skills: &[&str], prefixes: &[&str], direct_boost: f64) -> Self {
        Self {
            name: name.to_string(),
            skills: to_strings(skills),
            prefixes: to_strings(prefixes),
            direct_boost,
        }
    }

    /// Returns true if the skill belongs to this category.
    #[must_use]
    pub fn covers_skill(&self, skill: &str) -> bool {
        let skill = skill.to_lowercase();
        self.skills.iter().any(|s| *s == skill)
    }

    /// Returns true if the subject prefix is in this category's allowlist.
    #[must_use]
    pub fn allows_prefix(&self, prefix: &str) -> bool {
        self.prefixes.iter().any(|p| p == prefix)
    }
}

/// Immutable ranking configuration shared by search and filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    /// Domain rules checked in order; the first covering rule wins for direct search.
    pub domain_rules: Vec<DomainRule>,
    /// Minimum score kept by direct search.
    pub direct_min_score: f64,
    /// Score of the top semantic neighbour before skill bonuses.
    pub semantic_base_score: f64,
    /// Score lost per semantic rank.
    pub semantic_rank_decay: f64,
    /// Bonus per matched skill, multiplied by its weight.
    pub semantic_skill_bonus: f64,
    /// Boost for a semantic result whose matched skills are in-domain.
    pub semantic_domain_boost: f64,
    /// Minimum semantic score when at least one skill matched.
    pub semantic_min_score_matched: f64,
    /// Minimum semantic score when no skill matched.
    pub semantic_min_score_unmatched: f64,
    /// Skills that make a job technical for filtering.
    pub tech_skills: Vec<String>,
    /// Subject prefixes considered technical for filtering.
    pub tech_prefixes: Vec<String>,
    /// Specific technologies that MOOC names are expected to mention.
    pub specific_mooc_skills: Vec<String>,
    /// Maximum number of skills kept after extraction.
    pub max_skills: usize,
    /// Results listed per dataset in the top section.
    pub top_results: usize,
    /// Number of heaviest skills that get their own group.
    pub skill_groups: usize,
    /// Results listed per dataset in each skill group.
    pub per_skill_results: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            domain_rules: vec![
                DomainRule::new(
                    "tech",
                    &[
                        "aws",
                        "cloud",
                        "python",
                        "docker",
                        "kubernetes",
                        "linux",
                        "linux/unix",
                        "programming",
                    ],
                    &["CS", "CSE", "ECE", "CX", "ISYE", "CP", "MGT", "CYBR"],
                    0.4,
                ),
                DomainRule::new(
                    "data",
                    &[
                        "data science",
                        "data analysis",
                        "data visualization",
                        "statistics",
                        "statistics/math",
                    ],
                    &["CSE", "ISYE", "CS"],
                    0.35,
                ),
                DomainRule::new(
                    "ml",
                    &[
                        "machine learning",
                        "deep learning",
                        "deep learning/neural networks",
                        "neural networks",
                        "ai",
                    ],
                    &["CS", "CSE", "ISYE"],
                    0.35,
                ),
            ],
            direct_min_score: 0.65,
            semantic_base_score: 0.82,
            semantic_rank_decay: 0.02,
            semantic_skill_bonus: 0.05,
            semantic_domain_boost: 0.15,
            semantic_min_score_matched: 0.65,
            semantic_min_score_unmatched: 0.7,
            tech_skills: to_strings(&[
                "aws",
                "cloud",
                "python",
                "docker",
                "linux",
                "linux/unix",
                "programming",
                "javascript",
                "js/javascript",
                "java",
                "computing",
                "database",
                "databases",
                "cybersecurity",
                "kubernetes",
                "devops",
                "backend",
                "frontend",
            ]),
            tech_prefixes: to_strings(&[
                "CS", "CSE", "ECE", "CX", "ISYE", "CP", "MGT", "CYBR", "SWE",
            ]),
            specific_mooc_skills: to_strings(&["aws", "kubernetes", "tensorflow", "pytorch"]),
            max_skills: 10,
            top_results: 5,
            skill_groups: 6,
            per_skill_results: 3,
        }
    }
}

impl RankingPolicy {
    /// Direct-search boost for a skill on a course with the given prefix.
    ///
    /// Only the first rule covering the skill is considered.
    #[must_use]
    pub fn direct_domain_boost(&self, skill: &str, prefix: Option<&str>) -> f64 {
        let Some(prefix) = prefix else {
            return 0.0;
        };
        self.domain_rules
            .iter()
            .find(|rule| rule.covers_skill(skill))
            .filter(|rule| rule.allows_prefix(prefix))
            .map_or(0.0, |rule| rule.direct_boost)
    }

    /// Semantic-search boost, applied once if any category with a matched
    /// skill allows the prefix.
    #[must_use]
    pub fn semantic_domain_boost(&self, matched_skills: &[String], prefix: Option<&str>) -> f64 {
        let Some(prefix) = prefix else {
            return 0.0;
        };
        let in_domain = self.domain_rules.iter().any(|rule| {
            rule.allows_prefix(prefix) && matched_skills.iter().any(|s| rule.covers_skill(s))
        });
        if in_domain {
            self.semantic_domain_boost
        } else {
            0.0
        }
    }

    /// Returns true if any of the skills is technical.
    #[must_use]
    pub fn has_tech_skill<S: AsRef<str>>(&self, skills: &[S]) -> bool {
        skills.iter().any(|skill| {
            let skill = skill.as_ref().to_lowercase();
            self.tech_skills.iter().any(|t| *t == skill)
        })
    }

    /// Returns true if the prefix is in the technical allowlist.
    #[must_use]
    pub fn is_tech_prefix(&self, prefix: &str) -> bool {
        self.tech_prefixes.iter().any(|p| p == prefix)
    }

    /// Applies score overrides from a config file section.
    pub fn apply_overrides(&mut self, overrides: &ConfigFileRanking) {
        if let Some(v) = overrides.direct_min_score {
            self.direct_min_score = v;
        }
        if let Some(v) = overrides.semantic_min_score_matched {
            self.semantic_min_score_matched = v;
        }
        if let Some(v) = overrides.semantic_min_score_unmatched {
            self.semantic_min_score_unmatched = v;
        }
        if let Some(v) = overrides.max_skills {
            self.max_skills = v;
        }
        if let Some(v) = overrides.top_results {
            self.top_results = v;
        }
    }
}

/// `[ranking]` section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileRanking {
    /// Minimum direct-search score.
    pub direct_min_score: Option<f64>,
    /// Minimum semantic score with matched skills.
    pub semantic_min_score_matched: Option<f64>,
    /// Minimum semantic score without matched skills.
    pub semantic_min_score_unmatched: Option<f64>,
    /// Maximum number of skills kept.
    pub max_skills: Option<usize>,
    /// Results listed per dataset in the top section.
    pub top_results: Option<usize>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("python", Some("CS"), 0.4; "tech skill in tech prefix")]
    #[test_case("python", Some("HIST"), 0.0; "tech skill outside allowlist")]
    #[test_case("statistics/math", Some("ISYE"), 0.35; "data skill")]
    #[test_case("machine learning", Some("CSE"), 0.35; "ml skill")]
    #[test_case("machine learning", Some("ECE"), 0.0; "ml skill outside allowlist")]
    #[test_case("excel", Some("CS"), 0.0; "unknown skill")]
    #[test_case("python", None, 0.0; "mooc without prefix")]
    fn test_direct_domain_boost(skill: &str, prefix: Option<&str>, expected: f64) {
        let policy = RankingPolicy::default();
        assert!((policy.direct_domain_boost(skill, prefix) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semantic_domain_boost_applied_once() {
        let policy = RankingPolicy::default();
        let skills = vec![
            "python".to_string(),
            "machine learning".to_string(),
            "statistics".to_string(),
        ];
        // tech, data and ml all allow CS
        assert!((policy.semantic_domain_boost(&skills, Some("CS")) - 0.15).abs() < 1e-9);
        assert!((policy.semantic_domain_boost(&skills, Some("ECE")) - 0.15).abs() < 1e-9);
        assert!(policy.semantic_domain_boost(&skills, Some("HIST")).abs() < f64::EPSILON);
        assert!(policy.semantic_domain_boost(&skills, None).abs() < f64::EPSILON);
    }

    #[test_case("software engineering"; "software engineering")]
    #[test_case("coding"; "coding")]
    fn test_direct_boost_limited_to_listed_tech_skills(skill: &str) {
        let policy = RankingPolicy::default();
        assert!(policy.direct_domain_boost(skill, Some("CS")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tech_checks() {
        let policy = RankingPolicy::default();
        assert!(policy.has_tech_skill(&["Python"]));
        assert!(!policy.has_tech_skill(&["statistics/math"]));
        assert!(policy.is_tech_prefix("SWE"));
        assert!(!policy.is_tech_prefix("MATH"));
    }
}
