//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::embedding::Embedding;

    #[derive(Debug, Default)]
    pub struct MockEmbeddingProvider {
        vectors: HashMap<String, Vec<f32>>,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pin the vector returned for an exact input text
        pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.into(), vector);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            let embeddings = request
                .inputs()
                .iter()
                .enumerate()
                .map(|(idx, text)| {
                    let vector = self.vectors.get(text).cloned().unwrap_or_else(|| {
                        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
                        (0..8)
                            .map(|i| ((hash.wrapping_add(i) % 100) as f32 / 100.0) + 0.01)
                            .collect()
                    });
                    Embedding::new(idx, vector)
                })
                .collect();

            Ok(EmbeddingResponse::new(request.model(), embeddings))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
