//! Configuration management.
//!
//! Configuration is read from a TOML file, then environment variables are
//! applied on top. Heuristic tables ([`TaggingConfig`], [`RankingPolicy`]) are
//! built once from their defaults plus any threshold overrides and are then
//! treated as read-only.

mod ranking;
mod tagging;

pub use ranking::{ConfigFileRanking, DomainRule, RankingPolicy};
pub use tagging::{AttendancePhrases, CategoryRule, ConfigFileTagging, TaggingConfig};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for coursematch.
#[derive(Debug, Clone, Default)]
pub struct CoursematchConfig {
    /// Catalog and index locations.
    pub data: DataConfig,
    /// Tagging lexicons and thresholds.
    pub tagging: TaggingConfig,
    /// Search and filtering policy.
    pub ranking: RankingPolicy,
    /// LLM provider configuration.
    pub llm: LlmConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Catalog data locations.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Semicolon-separated course catalog CSV.
    pub courses_csv: Option<PathBuf>,
    /// MOOC CSV.
    pub moocs_csv: Option<PathBuf>,
    /// Directory holding persisted vector indexes.
    pub index_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            courses_csv: None,
            moocs_csv: None,
            index_dir: PathBuf::from(".coursematch/index"),
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider used for skill extraction.
    pub provider: LlmProviderKind,
    /// Model name.
    pub model: Option<String>,
    /// Base URL for the provider.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            model: None,
            base_url: None,
            timeout_ms: 30_000,
        }
    }
}

/// Available LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProviderKind {
    /// Ollama (local).
    #[default]
    Ollama,
    /// No LLM; skill extraction uses heuristics only.
    None,
}

impl LlmProviderKind {
    /// Parses a provider string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" | "disabled" => Self::None,
            _ => Self::Ollama,
        }
    }

    /// Returns the provider as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::None => "none",
        }
    }
}

/// Logging settings as configured (resolved by `observability`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Default level or filter directive.
    pub level: Option<String>,
    /// Optional log file path.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data section.
    pub data: Option<ConfigFileData>,
    /// Tagging threshold overrides.
    pub tagging: Option<ConfigFileTagging>,
    /// Ranking overrides.
    pub ranking: Option<ConfigFileRanking>,
    /// LLM section.
    pub llm: Option<ConfigFileLlm>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Data section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileData {
    /// Course catalog CSV path.
    pub courses_csv: Option<String>,
    /// MOOC CSV path.
    pub moocs_csv: Option<String>,
    /// Vector index directory.
    pub index_dir: Option<String>,
}

/// LLM section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// Provider name.
    pub provider: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl CoursematchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn parse_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/coursematch/` on macOS)
    /// 2. XDG config dir (`~/.config/coursematch/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs
            .config_dir()
            .join("coursematch")
            .join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("coursematch")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `CoursematchConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data) = file.data {
            if let Some(path) = data.courses_csv {
                config.data.courses_csv = Some(PathBuf::from(path));
            }
            if let Some(path) = data.moocs_csv {
                config.data.moocs_csv = Some(PathBuf::from(path));
            }
            if let Some(dir) = data.index_dir {
                config.data.index_dir = PathBuf::from(dir);
            }
        }
        if let Some(tagging) = file.tagging {
            config.tagging.apply_overrides(&tagging);
        }
        if let Some(ranking) = file.ranking {
            config.ranking.apply_overrides(&ranking);
        }
        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                config.llm.provider = LlmProviderKind::parse(&provider);
            }
            config.llm.model = llm.model;
            config.llm.base_url = llm.base_url;
            if let Some(timeout_ms) = llm.timeout_ms {
                config.llm.timeout_ms = timeout_ms;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable source.
    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup("COURSEMATCH_COURSES_CSV") {
            self.data.courses_csv = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("COURSEMATCH_MOOCS_CSV") {
            self.data.moocs_csv = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup("COURSEMATCH_INDEX_DIR") {
            self.data.index_dir = PathBuf::from(dir);
        }
        if let Some(provider) = lookup("COURSEMATCH_LLM_PROVIDER") {
            self.llm.provider = LlmProviderKind::parse(&provider);
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            self.llm.base_url = Some(host);
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(format) = lookup("COURSEMATCH_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(level) = lookup("COURSEMATCH_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        self
    }

    /// Sets the course catalog path.
    #[must_use]
    pub fn with_courses_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.courses_csv = Some(path.into());
        self
    }

    /// Sets the MOOC path.
    #[must_use]
    pub fn with_moocs_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.moocs_csv = Some(path.into());
        self
    }

    /// Sets the index directory.
    #[must_use]
    pub fn with_index_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.index_dir = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let config = CoursematchConfig::parse_toml(
            r#"
            [data]
            courses_csv = "data/courses.csv"
            index_dir = "/tmp/index"

            [tagging]
            project_grade_threshold = 20.0

            [ranking]
            direct_min_score = 0.7

            [llm]
            provider = "none"
            timeout_ms = 500

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.data.courses_csv,
            Some(PathBuf::from("data/courses.csv"))
        );
        assert_eq!(config.data.moocs_csv, None);
        assert_eq!(config.data.index_dir, PathBuf::from("/tmp/index"));
        assert_eq!(config.tagging.project.grade_threshold, Some(20.0));
        assert!((config.ranking.direct_min_score - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.llm.provider, LlmProviderKind::None);
        assert_eq!(config.llm.timeout_ms, 500);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = CoursematchConfig::parse_toml("[data\ncourses_csv = ");
        assert!(matches!(
            result,
            Err(crate::Error::OperationFailed { ref operation, .. }) if operation == "parse_config_file"
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("COURSEMATCH_MOOCS_CSV", "moocs.csv"),
            ("OLLAMA_HOST", "http://gpu-box:11434"),
            ("OLLAMA_MODEL", "llama3.2"),
            ("COURSEMATCH_LLM_PROVIDER", "none"),
            ("COURSEMATCH_LOG_LEVEL", "  "),
        ]);
        let config = CoursematchConfig::default()
            .with_overrides_from(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.data.moocs_csv, Some(PathBuf::from("moocs.csv")));
        assert_eq!(config.llm.base_url.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(config.llm.model.as_deref(), Some("llama3.2"));
        assert_eq!(config.llm.provider, LlmProviderKind::None);
        assert_eq!(config.logging.level, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nmodel = \"mistral\"\n").unwrap();

        let config = CoursematchConfig::load_from_file(&path).unwrap();
        assert_eq!(config.llm.model.as_deref(), Some("mistral"));
        assert_eq!(config.llm.provider, LlmProviderKind::Ollama);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = CoursematchConfig::load_from_file(Path::new("/nonexistent/coursematch.toml"));
        assert!(result.is_err());
    }
}
