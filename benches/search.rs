//! Benchmarks for course search.
//!
//! Benchmark targets:
//! - Direct search over 1,000 courses with 10 skills: <10ms
//! - Semantic search over 1,000 indexed courses: <20ms (hashed embedder)
//! - Fusion of 200 + 200 results: <1ms
//!
//! Uses the hash-based embedder so numbers are stable without a model
//! download.

// Criterion macros generate items without docs - this is expected for benchmarks
// Benchmarks use expect/unwrap for simplicity - panics are acceptable in benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use coursematch::config::RankingPolicy;
use coursematch::embedding::{DEFAULT_DIMENSIONS, HashedEmbedder};
use coursematch::models::{CourseRecord, MatchType, SearchResult, WeightedSkill};
use coursematch::search::{DirectSearch, SemanticSearch, SkillMatcher, combine};
use coursematch::storage::{MemoryVectorIndex, index_catalog};

// ============================================================================
// Test Data
// ============================================================================

const PREFIXES: [&str; 6] = ["CS", "CSE", "ISYE", "MATH", "HIST", "MGT"];

const TOPICS: [&str; 8] = [
    "Python programming and software design",
    "Statistics and probability for data analysis",
    "Machine learning with neural networks",
    "Database systems and SQL query processing",
    "Cloud computing on AWS and distributed systems",
    "Linear algebra and optimization",
    "American history since 1877",
    "Accounting and financial management",
];

fn catalog(size: usize) -> Vec<CourseRecord> {
    (0..size)
        .map(|i| {
            let prefix = PREFIXES[i % PREFIXES.len()];
            let topic = TOPICS[i % TOPICS.len()];
            CourseRecord::new(
                format!("{prefix} {}", 1000 + i),
                topic,
                format!("{topic}. Lectures, weekly problem sets and a term project."),
            )
        })
        .collect()
}

fn skills() -> Vec<WeightedSkill> {
    [
        ("python", 1.8),
        ("machine learning", 1.6),
        ("sql", 1.4),
        ("statistics", 1.3),
        ("aws", 1.2),
        ("data analysis", 1.1),
        ("linux", 1.0),
        ("optimization", 1.0),
        ("git", 1.0),
        ("docker", 1.0),
    ]
    .into_iter()
    .map(|(name, weight)| WeightedSkill::new(name, weight))
    .collect()
}

fn bench_direct(c: &mut Criterion) {
    let policy = RankingPolicy::default();
    let matcher = SkillMatcher::new(&skills());
    let mut group = c.benchmark_group("direct_search");

    for size in [100, 1_000] {
        let records = catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| DirectSearch::new(&policy).search(black_box(records), &matcher));
        });
    }
    group.finish();
}

fn bench_semantic(c: &mut Criterion) {
    let policy = RankingPolicy::default();
    let embedder = HashedEmbedder::new();
    let matcher = SkillMatcher::new(&skills());
    let mut group = c.benchmark_group("semantic_search");

    for size in [100, 1_000] {
        let records = catalog(size);
        let index = MemoryVectorIndex::new(DEFAULT_DIMENSIONS);
        index_catalog(&records, &embedder, &index).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            let search = SemanticSearch::new(&policy, &embedder, &index);
            b.iter(|| search.search(black_box(records), &matcher, "Data Scientist"));
        });
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let records = catalog(300);
    let results = |offset: usize, match_type: MatchType| -> Vec<SearchResult> {
        records[offset..offset + 200]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                SearchResult::from_entry(
                    record,
                    (i % 100) as f64 / 100.0,
                    match_type,
                    vec!["python".to_string()],
                )
            })
            .collect()
    };
    let direct = results(0, MatchType::Direct);
    let semantic = results(100, MatchType::Semantic);

    c.bench_function("combine/200x200", |b| {
        b.iter(|| combine(black_box(direct.clone()), black_box(semantic.clone())));
    });
}

criterion_group!(benches, bench_direct, bench_semantic, bench_combine);
criterion_main!(benches);
