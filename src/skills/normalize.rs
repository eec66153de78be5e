//! Skill canonicalization.

use std::collections::{HashMap, HashSet};

/// Synonym table: raw form (lowercase) to canonical form.
const SYNONYMS: &[(&str, &str)] = &[
    ("python programming", "python"),
    ("python coding", "python"),
    ("ml", "machine learning"),
    ("tensorflow", "tensorflow/keras"),
    ("pytorch", "pytorch"),
    ("artificial intelligence", "machine learning"),
    ("visualization", "data visualization"),
    ("postgresql", "sql"),
    ("mysql", "sql"),
    ("database", "databases"),
    ("cloud computing", "cloud"),
    ("aws cloud", "aws"),
    ("amazon web services", "aws"),
    ("azure cloud", "azure"),
    ("google cloud", "gcp"),
    ("software development", "software engineering"),
    ("javascript", "js/javascript"),
    ("js", "js/javascript"),
    ("react", "react/frontend"),
    ("ui/ux", "ux design"),
    ("statistics", "statistics/math"),
    ("mathematical", "statistics/math"),
    ("deep learning", "deep learning/neural networks"),
    ("nn", "deep learning/neural networks"),
    ("data analytics", "data analysis"),
    ("nlp", "natural language processing"),
    ("cv", "computer vision"),
    ("ci/cd", "devops/ci/cd"),
    ("linux", "linux/unix"),
    ("unix", "linux/unix"),
];

/// Maps raw skill strings onto canonical names.
///
/// Matching is exact on the trimmed, lowercased string; there is no
/// substring matching.
#[derive(Debug, Clone)]
pub struct SkillNormalizer {
    synonyms: HashMap<String, String>,
}

impl SkillNormalizer {
    /// Creates a normalizer with the built-in synonym table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            synonyms: SYNONYMS
                .iter()
                .map(|(raw, canonical)| ((*raw).to_string(), (*canonical).to_string()))
                .collect(),
        }
    }

    /// Adds or replaces a synonym.
    #[must_use]
    pub fn with_synonym(mut self, raw: &str, canonical: &str) -> Self {
        self.synonyms
            .insert(raw.trim().to_lowercase(), canonical.trim().to_lowercase());
        self
    }

    /// Canonical form of a single skill.
    #[must_use]
    pub fn canonical(&self, skill: &str) -> String {
        let key = skill.trim().to_lowercase();
        self.synonyms.get(&key).cloned().unwrap_or(key)
    }

    /// Normalizes a raw skill list.
    ///
    /// Blank entries are dropped and the result keeps first-occurrence order
    /// with duplicates removed.
    #[must_use]
    pub fn normalize<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        skills
            .iter()
            .map(|skill| self.canonical(skill.as_ref()))
            .filter(|skill| !skill.is_empty())
            .filter(|skill| seen.insert(skill.clone()))
            .collect()
    }
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_collapses_synonyms_and_duplicates() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(
            normalizer.normalize(&["ML", "Machine Learning", "python programming"]),
            vec!["machine learning", "python"]
        );
    }

    #[test_case("  AWS Cloud " => "aws" ; "trimmed and lowercased")]
    #[test_case("JavaScript" => "js/javascript" ; "javascript")]
    #[test_case("html" => "html" ; "unknown passes through")]
    #[test_case("mlops" => "mlops" ; "no substring matching")]
    fn test_canonical(raw: &str) -> String {
        SkillNormalizer::new().canonical(raw)
    }

    #[test]
    fn test_blank_entries_dropped() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(normalizer.normalize(&["", "  ", "sql"]), vec!["sql"]);
    }

    #[test]
    fn test_custom_synonym() {
        let normalizer = SkillNormalizer::new().with_synonym("K8s", "kubernetes");
        assert_eq!(normalizer.normalize(&["k8s", "Kubernetes"]), vec!["kubernetes"]);
    }
}
