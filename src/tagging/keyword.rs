//! Keyword occurrence counting per tag category.

use super::text::word_regexes;
use crate::config::TaggingConfig;
use crate::models::TagCategory;
use regex::Regex;
use std::collections::HashMap;

/// Counts whole-word keyword occurrences for each category.
///
/// Every keyword is counted independently, so "final exam" contributes to
/// both "final exam" and "exam".
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    lexicons: HashMap<TagCategory, Vec<Regex>>,
}

impl KeywordScorer {
    /// Compiles the lexicons from the tagging configuration.
    #[must_use]
    pub fn new(config: &TaggingConfig) -> Self {
        let lexicons = TagCategory::ALL
            .into_iter()
            .map(|category| (category, word_regexes(config.keywords(category))))
            .collect();
        Self { lexicons }
    }

    /// Counts keyword occurrences for a category.
    #[must_use]
    pub fn count(&self, text: &str, category: TagCategory) -> usize {
        let text = text.to_lowercase();
        self.lexicons.get(&category).map_or(0, |regexes| {
            regexes.iter().map(|r| r.find_iter(&text).count()).sum()
        })
    }
}
