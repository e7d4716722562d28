use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{GenerationError, LlmProvider, LlmRequest};

/// Single-shot completion adapter used by the review workflow
#[derive(Debug, Clone)]
pub struct ModelClient {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl ModelClient {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Send `prompt` as one user message and return the raw reply text.
    ///
    /// One outbound call, no retry; timeouts and upstream failures are `Api` errors.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = LlmRequest::single_prompt(prompt);

        let response = tokio::time::timeout(self.timeout, self.provider.chat(model, request))
            .await
            .map_err(|_| {
                GenerationError::api(format!(
                    "Request to {} timed out after {}s",
                    self.provider.provider_name(),
                    self.timeout.as_secs()
                ))
            })??;

        if let Some(usage) = &response.usage {
            debug!(
                model = %model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }

        Ok(response.message.content().to_string())
    }
}
