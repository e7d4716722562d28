use std::sync::Arc;

use super::http_client::HttpClient;
use super::{ModelClient, OpenAiProvider};
use crate::config::LlmConfig;
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Provider from configuration, reading the key from the configured env var
    pub fn create(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            DomainError::configuration(format!(
                "Environment variable {} is not set",
                config.api_key_env
            ))
        })?;

        Self::create_with_key(config, api_key)
    }

    pub fn create_with_key(
        config: &LlmConfig,
        api_key: impl Into<String>,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration("API key is empty"));
        }

        let http_client = HttpClient::with_timeout(config.timeout())?;
        let mut provider = OpenAiProvider::with_base_url(http_client, api_key, &config.base_url);

        if let Some(referer) = &config.referer {
            provider = provider.with_referer(referer);
        }

        Ok(Arc::new(provider))
    }

    /// Completion adapter bound to the configured timeout
    pub fn create_client(config: &LlmConfig) -> Result<ModelClient, DomainError> {
        Ok(ModelClient::new(Self::create(config)?, config.timeout()))
    }
}
