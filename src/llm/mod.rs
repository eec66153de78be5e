//! LLM client abstraction.
//!
//! Used only for skill extraction. Callers treat the provider as a black box
//! that returns free text, and every failure is recoverable.

mod ollama;

pub use ollama::OllamaClient;

use crate::Result;
use crate::config::{LlmConfig, LlmProviderKind};
use std::sync::Arc;
use std::time::Duration;

/// Trait for LLM providers.
pub trait LlmProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// HTTP client configuration for LLM providers.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            ..Self::default()
        }
    }
}

/// Builds a blocking HTTP client for LLM requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Builds the configured provider, or `None` when the LLM is disabled.
#[must_use]
pub fn build_provider(config: &LlmConfig) -> Option<Arc<dyn LlmProvider>> {
    match config.provider {
        LlmProviderKind::None => None,
        LlmProviderKind::Ollama => {
            let mut client = OllamaClient::new();
            if let Some(ref model) = config.model {
                client = client.with_model(model);
            }
            if let Some(ref base_url) = config.base_url {
                client = client.with_endpoint(base_url);
            }
            Some(Arc::new(
                client.with_http_config(LlmHttpConfig::from_config(config)),
            ))
        },
    }
}

/// Parses a comma-separated skill list from LLM output.
///
/// Tolerates a leading `Skills:` label, line breaks, list bullets and a
/// trailing period.
#[must_use]
pub fn parse_skill_list(response: &str) -> Vec<String> {
    let trimmed = response.trim();
    let body = trimmed
        .find("Skills:")
        .map_or(trimmed, |idx| &trimmed[idx + "Skills:".len()..]);

    body.split([',', '\n'])
        .map(|item| {
            item.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim()
                .trim_end_matches('.')
                .trim()
        })
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
