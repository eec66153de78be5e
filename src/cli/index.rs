//! Index CLI command.

use crate::Result;
use crate::models::DatasetKind;
use crate::services::RecommendationService;
use std::fmt::Write;

/// Index command handler.
#[derive(Debug, Clone)]
pub struct IndexCommand {
    datasets: Vec<DatasetKind>,
}

impl IndexCommand {
    /// Creates a command that rebuilds every dataset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            datasets: DatasetKind::ALL.to_vec(),
        }
    }

    /// Restricts the rebuild to one dataset.
    #[must_use]
    pub fn with_dataset(mut self, dataset: Option<DatasetKind>) -> Self {
        if let Some(dataset) = dataset {
            self.datasets = vec![dataset];
        }
        self
    }

    /// Rebuilds and persists the selected indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or indexing fails.
    pub fn run(&self, service: &RecommendationService) -> Result<String> {
        let mut out = String::new();
        for dataset in &self.datasets {
            let report = service.rebuild_index(*dataset)?;
            let _ = writeln!(
                out,
                "Indexed {} {} in {} batches ({} skipped)",
                report.indexed, report.dataset, report.batches, report.skipped
            );
        }
        Ok(out)
    }
}

impl Default for IndexCommand {
    fn default() -> Self {
        Self::new()
    }
}
