//! Tutor configuration
//!
//! Layered with the `config` crate, lowest to highest precedence:
//! - built-in defaults
//! - a YAML file (explicit path, else `<config_dir>/grallm/config.yaml`)
//! - `GRALLM_` environment variables, `__` between nesting levels
//!   (e.g. `GRALLM_LLM__MODEL`, `GRALLM_KNOWLEDGE__BASE_URL`)
//! - `GROQ_API_KEY` for `llm.api_key`

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const ENV_PREFIX: &str = "GRALLM";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("no API key configured; set GROQ_API_KEY or llm.api_key")]
    MissingApiKey,
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Language-model service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub answer_temperature: f32,
    pub explanation_temperature: f32,
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama3-8b-8192".to_string(),
            answer_temperature: 0.7,
            explanation_temperature: 0.5,
            request_timeout_secs: 60,
        }
    }
}

/// Knowledge-graph service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub base_url: String,
    /// Language segment of concept URIs (`/c/<language>/<token>`)
    pub language: String,
    /// Candidate edges requested per pair; only the first is used
    pub edge_limit: usize,
    pub request_timeout_secs: u64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.conceptnet.io".to_string(),
            language: "en".to_string(),
            edge_limit: 2,
            request_timeout_secs: 20,
        }
    }
}

/// Complete configuration passed to the tutor at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    pub llm: LlmConfig,
    pub knowledge: KnowledgeConfig,
    /// Concurrent pair lookups; 1 issues them one at a time
    pub relation_concurrency: usize,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            knowledge: KnowledgeConfig::default(),
            relation_concurrency: 4,
        }
    }
}

impl TutorConfig {
    /// Read one YAML file over the defaults. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::layered(Some(path), true, None, None)
    }

    /// Resolve defaults, file and environment without validating.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map(Path::to_path_buf).or_else(default_config_path);
        Self::layered(
            path.as_deref(),
            explicit.is_some(),
            Some(environment()),
            std::env::var(API_KEY_VAR).ok(),
        )
    }

    /// Resolve the full layered configuration and validate it.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::resolve(explicit)?;
        config.validate()?;
        Ok(config)
    }

    fn layered(
        path: Option<&Path>,
        required: bool,
        env: Option<Environment>,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Yaml)
                    .required(required),
            );
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        let config = builder
            .set_override_option("llm.api_key", api_key)?
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "llm.model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.knowledge.edge_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "knowledge.edge_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.knowledge.language.contains('/') || self.knowledge.language.is_empty() {
            return Err(ConfigError::Invalid {
                field: "knowledge.language",
                reason: format!("'{}' is not a language code", self.knowledge.language),
            });
        }
        Ok(())
    }

    /// Effective lookup concurrency (0 is treated as 1).
    pub fn lookup_concurrency(&self) -> usize {
        self.relation_concurrency.max(1)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .ignore_empty(true)
}

/// `<config_dir>/grallm/config.yaml`, e.g. `~/.config/grallm/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grallm").join("config.yaml"))
}
