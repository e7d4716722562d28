use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{LengthBounds, QualityThreshold, RateLimitConfig, WorkflowPolicy};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub rate_limit: RateLimitSettings,
    pub store: StoreConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// A selectable model with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
}

impl ModelOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub default_model: String,
    pub available_models: Vec<ModelOption>,
    pub timeout_secs: u64,
    pub referer: Option<String>,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn find_model(&self, id: &str) -> Option<&ModelOption> {
        self.available_models.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_attempts: u32,
    pub examples_limit: usize,
    pub min_review_length: usize,
    pub max_review_length: usize,
    pub thresholds: QualityThreshold,
}

impl GenerationConfig {
    pub fn policy(&self) -> WorkflowPolicy {
        WorkflowPolicy::new(self.thresholds, self.max_attempts)
    }

    pub fn length_bounds(&self) -> LengthBounds {
        LengthBounds {
            min: self.min_review_length,
            max: self.max_review_length,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitSettings {
    pub fn to_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(self.max_requests, Duration::from_secs(self.window_secs))
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    /// JSON file of reviews loaded by the in-memory backend
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Embedding model for semantic similarity; lexical only when unset
    pub embedding_model: Option<String>,
    pub lexical_weight: f64,
    pub semantic_weight: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            default_model: "google/gemini-flash-1.5".to_string(),
            available_models: vec![
                ModelOption::new("google/gemini-flash-1.5", "Google Gemini Flash 1.5"),
                ModelOption::new("openai/gpt-4-turbo", "GPT-4 Turbo"),
                ModelOption::new("amazon/nova-lite-v1", "Amazon Nova Lite"),
            ],
            timeout_secs: 15,
            referer: Some("http://localhost:8501".to_string()),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: WorkflowPolicy::DEFAULT_MAX_ATTEMPTS,
            examples_limit: 5,
            min_review_length: 50,
            max_review_length: 500,
            thresholds: QualityThreshold::default(),
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            embedding_model: None,
            lexical_weight: 0.5,
            semantic_weight: 0.5,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from one explicit file, without the environment layer
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?
            .try_deserialize()
    }
}
