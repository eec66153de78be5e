//! Property-based tests for tagging and ranking invariants.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Attendance strength stays within `[0, 1]`
//! - Search result scores are clamped to `[0, 1]`
//! - Combining with an empty result set is a no-op
//! - Skill normalization is idempotent and duplicate-free
//! - Skill weights stay within `[1, 2]`

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use coursematch::config::TaggingConfig;
use coursematch::models::{CourseRecord, MatchType, MoocRecord, SearchResult};
use coursematch::search::combine;
use coursematch::skills::{SkillNormalizer, weight_skills};
use coursematch::tagging::{AttendancePolicyScorer, SyllabusTagger};
use proptest::prelude::*;
use std::collections::HashSet;

fn attendance_sentence() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Attendance is mandatory.",
        "Attendance will be taken every class.",
        "No more than 2 absences are allowed.",
        "Absences will affect your grade.",
        "Participation 10% of the final grade.",
        "Students are expected to attend and arrive on time.",
        "Attend class regularly.",
        "The weather was nice.",
    ])
    .prop_map(str::to_string)
}

fn result_strategy() -> impl Strategy<Value = SearchResult> {
    (
        0usize..6,
        -1.0f64..2.5,
        prop::bool::ANY,
        prop::sample::subsequence(vec!["python", "sql", "aws", "statistics"], 0..3),
    )
        .prop_map(|(idx, score, mooc, skills)| {
            let skills: Vec<String> = skills.into_iter().map(str::to_string).collect();
            let match_type = if mooc {
                MatchType::Semantic
            } else {
                MatchType::Direct
            };
            if mooc {
                SearchResult::from_entry(
                    &MoocRecord::new(format!("MOOC {idx}"), "About", "https://example.org"),
                    score,
                    match_type,
                    skills,
                )
            } else {
                SearchResult::from_entry(
                    &CourseRecord::new(format!("CS {}", 1000 + idx), "Course", "Body"),
                    score,
                    match_type,
                    skills,
                )
            }
        })
}

proptest! {
    /// Property: attendance strength never leaves `[0, 1]`, however many
    /// signal sentences are stacked.
    #[test]
    fn prop_attendance_strength_clamped(sentences in prop::collection::vec(attendance_sentence(), 0..40)) {
        let scorer = AttendancePolicyScorer::new(&TaggingConfig::default());
        let strength = scorer.score(&sentences.join(" "));
        prop_assert!((0.0..=1.0).contains(&strength));
    }

    /// Property: tagging never panics and always reports every category.
    #[test]
    fn prop_tagging_total(text in "[ -~\n\t]{0,400}") {
        let tags = SyllabusTagger::with_defaults().generate_tags(&text);
        prop_assert_eq!(tags.len(), 5);
    }

    /// Property: result scores are clamped on construction and after fusion.
    #[test]
    fn prop_scores_clamped(
        direct in prop::collection::vec(result_strategy(), 0..12),
        semantic in prop::collection::vec(result_strategy(), 0..12),
    ) {
        for result in direct.iter().chain(&semantic) {
            prop_assert!((0.0..=1.0).contains(&result.score));
        }
        for result in combine(direct, semantic) {
            prop_assert!((0.0..=1.0).contains(&result.score));
        }
    }

    /// Property: fused keys are unique and combining with nothing is a no-op.
    #[test]
    fn prop_fusion_idempotent(
        direct in prop::collection::vec(result_strategy(), 0..12),
        semantic in prop::collection::vec(result_strategy(), 0..12),
    ) {
        let once = combine(direct, semantic);
        let keys: HashSet<&str> = once.iter().map(|r| r.key.as_str()).collect();
        prop_assert_eq!(keys.len(), once.len());

        let twice = combine(once.clone(), Vec::new());
        prop_assert_eq!(twice, once);
    }

    /// Property: normalization is idempotent and case-insensitively unique.
    #[test]
    fn prop_normalization_idempotent(
        skills in prop::collection::vec(
            prop::sample::select(vec![
                "ML", "Machine Learning", "python programming", "Python", "SQL",
                "mysql", "Statistics", "deep learning", "AWS", "amazon web services",
                "Linux", "unix", "", "  ", "Rust",
            ]),
            0..20,
        )
    ) {
        let normalizer = SkillNormalizer::new();
        let once = normalizer.normalize(&skills);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(&twice, &once);

        let lowered: HashSet<String> = once.iter().map(|s| s.to_lowercase()).collect();
        prop_assert_eq!(lowered.len(), once.len());
        prop_assert!(once.iter().all(|s| !s.trim().is_empty()));
    }

    /// Property: weights stay within bounds and are sorted descending.
    #[test]
    fn prop_weights_bounded(
        title in "[a-z ]{0,30}",
        description in "[a-z \n]{0,200}",
    ) {
        let skills = ["python", "sql", "aws", "data"];
        let weighted = weight_skills(&skills, &title, &description);
        prop_assert_eq!(weighted.len(), skills.len());
        for skill in &weighted {
            prop_assert!((1.0..=2.0).contains(&skill.weight));
        }
        prop_assert!(weighted.windows(2).all(|w| w[0].weight >= w[1].weight));
    }
}
