use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::llm::{FinishReason, Usage};
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse, Message};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const PROVIDER_NAME: &str = "openrouter";

/// Chat-completions provider for OpenAI-compatible endpoints (OpenRouter by default)
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    extra_headers: Vec<(String, String)>,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENROUTER_BASE_URL)
    }

    /// `base_url` includes the API version segment, e.g. `.../api/v1`
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            extra_headers: Vec::new(),
        }
    }

    /// Attribution header OpenRouter uses to identify the calling app
    pub fn with_referer(self, referer: impl Into<String>) -> Self {
        self.with_header("HTTP-Referer", referer)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<OpenAiMessage> =
            request.messages.iter().map(OpenAiMessage::from_domain).collect();

        serde_json::json!({
            "model": model,
            "messages": messages,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        headers.extend(
            self.extra_headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        headers
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        // OpenRouter reports some upstream failures inside a 200 body
        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(DomainError::provider(PROVIDER_NAME, message));
        }

        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No choices in response"))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "Empty message content"))?;

        let mut llm_response =
            LlmResponse::new(response.id, response.model, Message::assistant(content));

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::parse(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gen-123",
            "model": "google/gemini-flash-1.5",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 42, "completion_tokens": 17, "total_tokens": 59 }
        })
    }

    #[tokio::test]
    async fn test_chat_returns_content_and_usage() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("Отличная кофейня"));
        let provider = OpenAiProvider::new(client, "test-api-key");

        let response = provider
            .chat("google/gemini-flash-1.5", LlmRequest::single_prompt("Напиши отзыв"))
            .await
            .unwrap();

        assert_eq!(response.id, "gen-123");
        assert_eq!(response.content(), "Отличная кофейня");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 59);
    }

    #[tokio::test]
    async fn test_request_body_and_headers() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("ok"));
        let provider =
            OpenAiProvider::new(client, "sk-or-test").with_referer("http://localhost:8501");

        provider
            .chat("openai/gpt-4-turbo", LlmRequest::single_prompt("Проверь тему"))
            .await
            .unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);

        let body = &requests[0].body;
        assert_eq!(body["model"], "openai/gpt-4-turbo");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Проверь тему");
        assert_eq!(body.as_object().unwrap().len(), 2);

        let headers = &requests[0].headers;
        assert!(headers.contains(&("Authorization".into(), "Bearer sk-or-test".into())));
        assert!(headers.contains(&("HTTP-Referer".into(), "http://localhost:8501".into())));
    }

    #[tokio::test]
    async fn test_transport_error_is_provider_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection reset");
        let provider = OpenAiProvider::new(client, "key");

        let result = provider.chat("m", LlmRequest::single_prompt("x")).await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_error_envelope_is_provider_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({ "error": { "code": 429, "message": "Rate limit exceeded" } }),
        );
        let provider = OpenAiProvider::new(client, "key");

        let error = provider
            .chat("m", LlmRequest::single_prompt("x"))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_missing_choices_is_error() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({ "id": "x", "model": "m", "choices": [] }));
        let provider = OpenAiProvider::new(client, "key");

        let result = provider.chat("m", LlmRequest::single_prompt("x")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let url = "http://localhost:8080/v1/chat/completions";
        let client = MockHttpClient::new().with_response(url, completion("local"));
        let provider = OpenAiProvider::with_base_url(client, "key", "http://localhost:8080/v1/");

        let response = provider
            .chat("m", LlmRequest::single_prompt("x"))
            .await
            .unwrap();
        assert_eq!(response.content(), "local");
    }
}
