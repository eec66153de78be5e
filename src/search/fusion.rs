//! Merging direct and semantic results.

use crate::models::{MatchType, SearchResult};
use std::collections::HashMap;

/// Merges direct and semantic results by key.
///
/// Output keeps first-appearance order (direct results first). When a key
/// appears more than once the higher score wins and matching skills are
/// unioned; a key found by both sources is labelled
/// [`MatchType::DirectSemantic`].
#[must_use]
pub fn combine(direct: Vec<SearchResult>, semantic: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut merged: Vec<SearchResult> = Vec::with_capacity(direct.len() + semantic.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in direct.into_iter().chain(semantic) {
        let Some(&pos) = positions.get(&result.key) else {
            positions.insert(result.key.clone(), merged.len());
            merged.push(result);
            continue;
        };

        let existing = &mut merged[pos];
        if existing.match_type != result.match_type {
            existing.match_type = MatchType::DirectSemantic;
        }
        if result.score > existing.score {
            existing.score = result.score;
        }
        existing.merge_skills(&result.matching_skills);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRecord, MoocRecord};

    fn course(id: &str, score: f64, match_type: MatchType, skills: &[&str]) -> SearchResult {
        SearchResult::from_entry(
            &CourseRecord::new(id, "Name", ""),
            score,
            match_type,
            skills.iter().map(|s| (*s).to_string()).collect(),
        )
    }

    #[test]
    fn test_cross_source_merge() {
        let combined = combine(
            vec![course("CS 1", 0.7, MatchType::Direct, &["python"])],
            vec![course("CS 1", 0.9, MatchType::Semantic, &["sql", "python"])],
        );
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].match_type, MatchType::DirectSemantic);
        assert!((combined[0].score - 0.9).abs() < 1e-9);
        assert_eq!(combined[0].matching_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_higher_direct_score_kept() {
        let combined = combine(
            vec![course("CS 1", 0.95, MatchType::Direct, &[])],
            vec![course("CS 1", 0.7, MatchType::Semantic, &[])],
        );
        assert!((combined[0].score - 0.95).abs() < 1e-9);
        assert_eq!(combined[0].match_type, MatchType::DirectSemantic);
    }

    #[test]
    fn test_same_source_duplicates() {
        let combined = combine(
            vec![
                course("CS 1", 0.7, MatchType::Direct, &["python"]),
                course("CS 2", 0.8, MatchType::Direct, &["sql"]),
                course("CS 1", 0.75, MatchType::Direct, &["docker"]),
            ],
            Vec::new(),
        );
        let keys: Vec<_> = combined.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["CS 1", "CS 2"]);
        assert_eq!(combined[0].match_type, MatchType::Direct);
        assert!((combined[0].score - 0.75).abs() < 1e-9);
        assert_eq!(combined[0].matching_skills, vec!["python", "docker"]);
    }

    #[test]
    fn test_combining_with_empty_is_noop() {
        let once = combine(
            vec![course("CS 1", 0.7, MatchType::Direct, &["python"])],
            vec![
                course("CS 1", 0.9, MatchType::Semantic, &["sql"]),
                course("CS 3", 0.66, MatchType::Semantic, &[]),
            ],
        );
        assert_eq!(combine(once.clone(), Vec::new()), once);
    }

    #[test]
    fn test_moocs_keyed_by_name() {
        let a = SearchResult::from_entry(
            &MoocRecord::new("Docker 101", "", ""),
            0.7,
            MatchType::Semantic,
            Vec::new(),
        );
        let combined = combine(Vec::new(), vec![a.clone(), a]);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].match_type, MatchType::Semantic);
    }
}
