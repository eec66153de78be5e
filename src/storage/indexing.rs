//! Batched catalog indexing.

use super::{Metadata, VectorIndex};
use crate::Result;
use crate::embedding::Embedder;
use crate::models::{CatalogEntry, DatasetKind};

/// Summary of an indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
    /// Dataset that was indexed.
    pub dataset: DatasetKind,
    /// Records added to the index.
    pub indexed: usize,
    /// Records with no text to embed.
    pub skipped: usize,
    /// Number of `add_batch` calls.
    pub batches: usize,
}

/// Text stored and embedded for a record: the body, or the title when the
/// body is blank.
fn document_text<R: CatalogEntry>(record: &R) -> &str {
    let body = record.body().trim();
    if body.is_empty() {
        record.title().trim()
    } else {
        body
    }
}

fn entry_metadata<R: CatalogEntry>(record: &R) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("key".to_string(), record.key().to_string());
    metadata.insert("title".to_string(), record.title().to_string());
    metadata.insert("dataset".to_string(), R::KIND.as_str().to_string());
    metadata.insert("level".to_string(), record.level().as_str().to_string());
    if let Some(prefix) = record.subject_prefix() {
        metadata.insert("subject_prefix".to_string(), prefix.to_string());
    }
    if let Some(link) = record.link() {
        metadata.insert("link".to_string(), link.to_string());
    }
    metadata
}

/// Embeds records and adds them to the index in dataset-sized batches.
///
/// Ids are record keys, so re-indexing a record replaces it.
///
/// # Errors
///
/// Returns an error if embedding or the index write fails; batches written
/// before the failure stay in the index.
pub fn index_catalog<R: CatalogEntry>(
    records: &[R],
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
) -> Result<IndexReport> {
    let dataset = R::KIND;
    let (usable, empty): (Vec<&R>, Vec<&R>) = records
        .iter()
        .partition(|record| !document_text(*record).is_empty());

    let mut report = IndexReport {
        dataset,
        indexed: 0,
        skipped: empty.len(),
        batches: 0,
    };

    for batch in usable.chunks(dataset.index_batch_size()) {
        let documents: Vec<String> = batch
            .iter()
            .map(|record| document_text(*record).to_string())
            .collect();
        let texts: Vec<&str> = documents.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&texts)?;
        let ids: Vec<String> = batch.iter().map(|r| r.key().to_string()).collect();
        let metadata: Vec<Metadata> = batch.iter().map(|r| entry_metadata(*r)).collect();

        index.add_batch(&ids, &vectors, &documents, &metadata)?;

        report.indexed += batch.len();
        report.batches += 1;
        tracing::info!(
            dataset = dataset.as_str(),
            batch = report.batches,
            indexed = report.indexed,
            total = usable.len(),
            "Indexed batch"
        );
    }

    if report.skipped > 0 {
        tracing::warn!(
            dataset = dataset.as_str(),
            skipped = report.skipped,
            "Skipped records without text"
        );
    }
    Ok(report)
}

/// Clears the index and rebuilds it from the records.
///
/// # Errors
///
/// Returns an error if clearing or indexing fails.
pub fn refresh_index<R: CatalogEntry>(
    records: &[R],
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
) -> Result<IndexReport> {
    index.clear()?;
    index_catalog(records, embedder, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashedEmbedder;
    use crate::models::{CourseRecord, MoocRecord};
    use crate::storage::MemoryVectorIndex;

    fn courses(n: usize) -> Vec<CourseRecord> {
        (0..n)
            .map(|i| {
                CourseRecord::new(
                    format!("CS {}", 1000 + i),
                    format!("Course {i}"),
                    format!("Topic number {i} in computing"),
                )
            })
            .collect()
    }

    #[test]
    fn test_batches_by_dataset_size() {
        let embedder = HashedEmbedder::with_dimensions(16);
        let index = MemoryVectorIndex::new(16);
        let report = index_catalog(&courses(1001), &embedder, &index).unwrap();

        assert_eq!(report.indexed, 1001);
        assert_eq!(report.batches, 3);
        assert_eq!(index.count().unwrap(), 1001);
    }

    #[test]
    fn test_metadata_and_documents() {
        let embedder = HashedEmbedder::with_dimensions(16);
        let index = MemoryVectorIndex::new(16);
        let moocs = vec![
            MoocRecord::new("Intro to Docker", "Containers from scratch", "https://x"),
            MoocRecord::new("Empty", "   ", ""),
        ];
        let report = index_catalog(&moocs, &embedder, &index).unwrap();
        assert_eq!(report.indexed, 2);
        assert_eq!(report.skipped, 0);

        let query = embedder.embed("Containers from scratch").unwrap();
        let hit = &index.query_nearest(&query, 1).unwrap()[0];
        assert_eq!(hit.id, "Intro to Docker");
        assert_eq!(hit.document, "Containers from scratch");
        assert_eq!(hit.metadata["dataset"], "moocs");
        assert_eq!(hit.metadata["link"], "https://x");
    }

    #[test]
    fn test_skips_records_without_text() {
        let embedder = HashedEmbedder::with_dimensions(16);
        let index = MemoryVectorIndex::new(16);
        let records = vec![CourseRecord::new("CS 1301", "", "")];
        let report = index_catalog(&records, &embedder, &index).unwrap();
        assert_eq!(report.indexed, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.batches, 0);
    }

    #[test]
    fn test_refresh_clears_first() {
        let embedder = HashedEmbedder::with_dimensions(16);
        let index = MemoryVectorIndex::new(16);
        index_catalog(&courses(10), &embedder, &index).unwrap();
        refresh_index(&courses(3), &embedder, &index).unwrap();
        assert_eq!(index.count().unwrap(), 3);
    }
}
