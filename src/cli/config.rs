//! Config CLI command.

use crate::config::CoursematchConfig;
use std::fmt::Write;
use std::path::Path;

/// Config command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigCommand;

impl ConfigCommand {
    /// Creates a new config command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Describes the resolved configuration.
    #[must_use]
    pub fn show(&self, config: &CoursematchConfig) -> String {
        let path = |p: Option<&Path>| {
            p.map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
        };
        let ranking = &config.ranking;

        let mut out = String::from("Coursematch Configuration\n\n");
        let _ = writeln!(out, "[data]");
        let _ = writeln!(
            out,
            "  courses_csv: {}",
            path(config.data.courses_csv.as_deref())
        );
        let _ = writeln!(out, "  moocs_csv:   {}", path(config.data.moocs_csv.as_deref()));
        let _ = writeln!(out, "  index_dir:   {}", config.data.index_dir.display());
        let _ = writeln!(out, "\n[llm]");
        let _ = writeln!(out, "  provider:    {}", config.llm.provider.as_str());
        let _ = writeln!(
            out,
            "  model:       {}",
            config.llm.model.as_deref().unwrap_or("(default)")
        );
        let _ = writeln!(
            out,
            "  base_url:    {}",
            config.llm.base_url.as_deref().unwrap_or("(default)")
        );
        let _ = writeln!(out, "  timeout_ms:  {}", config.llm.timeout_ms);
        let _ = writeln!(out, "\n[ranking]");
        let _ = writeln!(out, "  direct_min_score: {:.2}", ranking.direct_min_score);
        let _ = writeln!(
            out,
            "  semantic_min_score: {:.2} (matched) / {:.2} (unmatched)",
            ranking.semantic_min_score_matched, ranking.semantic_min_score_unmatched
        );
        let _ = writeln!(out, "  max_skills: {}", ranking.max_skills);
        let _ = writeln!(out, "\n[logging]");
        let _ = writeln!(
            out,
            "  format: {}",
            config.logging.format.as_deref().unwrap_or("pretty")
        );
        let _ = writeln!(
            out,
            "  level:  {}",
            config.logging.level.as_deref().unwrap_or("warn")
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults() {
        let out = ConfigCommand::new().show(&CoursematchConfig::default());
        assert!(out.contains("courses_csv: (not set)"));
        assert!(out.contains("provider:    ollama"));
        assert!(out.contains("direct_min_score: 0.65"));
    }

    #[test]
    fn test_show_paths() {
        let config = CoursematchConfig::default().with_courses_csv("data/courses.csv");
        let out = ConfigCommand::new().show(&config);
        assert!(out.contains("courses_csv: data/courses.csv"));
    }
}
