//! LLM provider implementations

mod client;
mod factory;
mod http_client;
mod openai;

pub use client::ModelClient;
pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiProvider, DEFAULT_OPENROUTER_BASE_URL};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
