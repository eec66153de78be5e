//! Recommend CLI command.

use crate::Result;
use crate::rendering::{OutputFormat, render};
use crate::services::{RecommendationRequest, RecommendationService};

/// Recommend command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendCommand {
    format: OutputFormat,
}

impl RecommendCommand {
    /// Creates a recommend command rendering Markdown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            format: OutputFormat::Markdown,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Runs a recommendation request and renders the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or rendering fails.
    pub fn run(
        &self,
        service: &RecommendationService,
        request: &RecommendationRequest,
    ) -> Result<String> {
        let outcome = service.recommend_courses(request)?;
        render(&outcome, self.format)
    }
}
