//! Configuration loading and management for pagebrief.
//!
//! Loads settings from `pagebrief.toml` with environment variable overrides for sensitive data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing OpenAI API key (set OPENAI_API_KEY or api.openai_key)")]
    MissingApiKey,
}

/// Placeholder in the per-segment system role that receives the computed
/// token budget for each partial summary.
pub const MAX_TOKENS_PLACEHOLDER: &str = "{max_tokens}";

/// LLM endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,
    /// Sampling temperature for all summarisation calls
    pub temperature: f32,
    /// Override for the chat-completions endpoint base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Summarisation pass configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Token budget shared by all partial summaries together
    pub token_budget: usize,
    /// Safety margin subtracted from each segment's share of the budget
    pub token_margin: usize,
    /// Number of characters copied from each neighbouring segment into a prompt
    pub overlap_chars: usize,
    /// Maximum characters per segment when the loader splits a page
    pub segment_chars: usize,
    /// System role for per-segment calls, must contain `{max_tokens}`
    pub segment_role: String,
    /// System role for the final condensing call
    pub final_role: String,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub llm: LlmConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (pagebrief.toml in cwd or
    /// home), falling back to defaults when no config file exists
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::find_config_file()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override sensitive values from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Result<PathBuf, ConfigError> {
        // Check current directory first
        let local_config = PathBuf::from("pagebrief.toml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("pagebrief").join("pagebrief.toml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Default to local path (will error on read)
        Ok(local_config)
    }

    /// Get the OpenAI API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .openai_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            base_url: None,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            token_budget: 3000,
            token_margin: 100,
            overlap_chars: 150,
            segment_chars: 4000,
            segment_role: format!(
                "You will receive a chunk of a webpage. Write a concise summary of it, \
                 preserving the key facts and figures. Keep the summary below {} tokens.",
                MAX_TOKENS_PLACEHOLDER
            ),
            final_role: "You will receive the concatenated summaries of consecutive chunks \
                         of a single webpage. Compose them into one coherent summary of the \
                         whole page."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let toml_str = r#"
            [llm]
            model = "gpt-4o-mini"
            temperature = 0.2
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.summarizer.token_budget, 3000);
        assert!(config
            .summarizer
            .segment_role
            .contains(MAX_TOKENS_PLACEHOLDER));
        assert!(config.api.openai_key.is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[llm]
model = "gpt-4o"
temperature = 0.0

[summarizer]
token_budget = 1200
token_margin = 50
overlap_chars = 80
segment_chars = 2000
segment_role = "Summarise below {{max_tokens}} tokens."
final_role = "Merge the partial summaries."

[api]
openai_key = "from-file"
"#
        )
        .unwrap();

        let config = Config::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.summarizer.token_budget, 1200);
        assert_eq!(config.summarizer.overlap_chars, 80);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let config = Config {
            llm: LlmConfig::default(),
            summarizer: SummarizerConfig::default(),
            api: ApiConfig::default(),
        };
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
    }
}
