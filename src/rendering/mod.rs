//! Output rendering for recommendations.
//!
//! Recommendations render either as a Markdown report or as JSON.

mod markdown;

pub use markdown::{NO_RESULTS_MESSAGE, render_markdown};

use crate::models::RecommendationOutcome;
use crate::{Error, Result};
use std::str::FromStr;

/// Output format for rendered recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable Markdown report.
    #[default]
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Returns the format as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!("unknown output format: {other}"))),
        }
    }
}

/// Renders a recommendation outcome in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(outcome: &RecommendationOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(outcome)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(outcome).map_err(|e| Error::OperationFailed {
                operation: "render_json".to_string(),
                cause: e.to_string(),
            })
        },
    }
}
