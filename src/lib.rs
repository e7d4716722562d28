//! Review Forge
//!
//! Generates synthetic Russian business reviews grounded on real reviews of
//! the same category:
//! - theme validation, generation and self-check through an LLM
//! - exemplar retrieval from PostgreSQL or a JSON seed file
//! - display-only similarity metrics against the exemplars

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use api::state::AppState;
use config::{StoreBackend, StoreConfig};
use domain::{EmbeddingProvider, ExemplarStore, ReviewPrompts};
use infrastructure::embedding::{HttpClient, OpenAiEmbeddingProvider};
use infrastructure::exemplar::{InMemoryExemplarStore, PostgresExemplarStore};
use infrastructure::llm::LlmProviderFactory;
use infrastructure::metrics::SimilarityScorer;
use infrastructure::rate_limit::RateLimiter;
use infrastructure::review::ReviewService;

/// Exemplar store for the configured backend
pub async fn create_exemplar_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ExemplarStore>> {
    match config.backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("store.database_url is required for the postgres backend")?;
            let store = PostgresExemplarStore::connect(url).await?;
            info!("Using PostgreSQL exemplar store");
            Ok(Arc::new(store))
        }
        StoreBackend::InMemory => {
            let store = match &config.seed_file {
                Some(path) => InMemoryExemplarStore::from_json_file(path)
                    .with_context(|| format!("Failed to load seed file {}", path))?,
                None => {
                    warn!("No seed file configured, in-memory exemplar store is empty");
                    InMemoryExemplarStore::new()
                }
            };
            info!(reviews = store.len(), "Using in-memory exemplar store");
            Ok(Arc::new(store))
        }
    }
}

fn create_scorer(config: &AppConfig) -> anyhow::Result<Option<SimilarityScorer>> {
    let metrics = &config.metrics;
    if !metrics.enabled {
        return Ok(None);
    }

    let Some(model) = &metrics.embedding_model else {
        return Ok(Some(SimilarityScorer::lexical_only()));
    };

    let api_key = std::env::var(&config.llm.api_key_env)
        .with_context(|| format!("Environment variable {} is not set", config.llm.api_key_env))?;
    let http_client = HttpClient::with_timeout(config.llm.timeout())?;
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::with_base_url(
        http_client,
        api_key,
        &config.llm.base_url,
    ));

    info!(model = %model, "Semantic similarity enabled");

    Ok(Some(SimilarityScorer::with_embeddings(
        provider,
        model,
        metrics.lexical_weight,
        metrics.semantic_weight,
    )))
}

/// Review service wired from configuration
pub async fn create_review_service(config: &AppConfig) -> anyhow::Result<ReviewService> {
    let store = create_exemplar_store(&config.store).await?;
    let client = LlmProviderFactory::create_client(&config.llm)?;
    let prompts = ReviewPrompts::new(config.generation.length_bounds());

    let service = ReviewService::new(
        store,
        client,
        prompts,
        config.generation.policy(),
        config.llm.clone(),
        config.generation.examples_limit,
    );

    Ok(match create_scorer(config)? {
        Some(scorer) => service.with_scorer(scorer),
        None => service,
    })
}

/// Shared state for the HTTP server
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_review_service(config).await?;
    let rate_limiter = RateLimiter::new(config.rate_limit.to_config());

    Ok(AppState::new(Arc::new(service), Arc::new(rate_limiter)))
}
