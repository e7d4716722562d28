//! Embedding providers for semantic similarity

mod openai;

pub use openai::OpenAiEmbeddingProvider;

pub use super::llm::{HttpClient, HttpClientTrait};
