//! Review service - exemplar lookup, generation and similarity metrics

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::generator::ReviewGenerator;
use crate::config::{LlmConfig, ModelOption};
use crate::domain::review::messages;
use crate::domain::{
    DomainError, ExemplarSet, ExemplarStore, GenerationOutcome, GenerationRequest, Rating,
    ReviewPrompts, WorkflowPolicy,
};
use crate::infrastructure::llm::ModelClient;
use crate::infrastructure::metrics::{SimilarityReport, SimilarityScorer};

/// Caller input for one generation
#[derive(Debug, Clone)]
pub struct ReviewParams {
    pub theme: String,
    pub rating: u8,
    pub category: String,
    /// Catalogue model id; the configured default when `None`
    pub model: Option<String>,
}

/// Generation outcome enriched with the exemplars it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub model: String,
    #[serde(flatten)]
    pub outcome: GenerationOutcome,
    pub exact_match: bool,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SimilarityReport>,
}

/// Two generations of the same input with different models
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub first: ReviewResult,
    pub second: ReviewResult,
}

/// Review service tying the exemplar store to the generation workflow
pub struct ReviewService {
    store: Arc<dyn ExemplarStore>,
    client: ModelClient,
    prompts: Arc<ReviewPrompts>,
    policy: WorkflowPolicy,
    llm: LlmConfig,
    examples_limit: usize,
    scorer: Option<SimilarityScorer>,
}

impl fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewService")
            .field("store", &self.store.store_name())
            .field("provider", &self.client.provider_name())
            .field("policy", &self.policy)
            .field("examples_limit", &self.examples_limit)
            .finish()
    }
}

impl ReviewService {
    pub fn new(
        store: Arc<dyn ExemplarStore>,
        client: ModelClient,
        prompts: ReviewPrompts,
        policy: WorkflowPolicy,
        llm: LlmConfig,
        examples_limit: usize,
    ) -> Self {
        Self {
            store,
            client,
            prompts: Arc::new(prompts),
            policy,
            llm,
            examples_limit,
            scorer: None,
        }
    }

    /// Attach similarity scoring for produced reviews
    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub async fn categories(&self) -> Result<Vec<String>, DomainError> {
        self.store.list_categories().await
    }

    pub fn models(&self) -> &[ModelOption] {
        &self.llm.available_models
    }

    pub fn default_model(&self) -> &str {
        &self.llm.default_model
    }

    /// Catalogue id for `requested`, or the default model
    pub fn resolve_model(&self, requested: Option<&str>) -> Result<String, DomainError> {
        let id = requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.llm.default_model);

        self.llm
            .find_model(id)
            .map(|m| m.id.clone())
            .ok_or_else(|| DomainError::validation(format!("Unknown model '{}'", id)))
    }

    pub fn generator(&self, model: impl Into<String>) -> ReviewGenerator {
        ReviewGenerator::new(
            self.client.clone(),
            self.prompts.clone(),
            self.policy,
            model,
        )
    }

    /// Generate one review grounded on exemplars from the store
    pub async fn generate(&self, params: ReviewParams) -> Result<ReviewResult, DomainError> {
        let model = self.resolve_model(params.model.as_deref())?;
        let request = Self::request(&params)?;
        let exemplars = self.exemplars(&request).await?;

        Ok(self.run(&model, request, &exemplars).await)
    }

    /// Generate with two models concurrently on the same exemplars
    pub async fn compare(
        &self,
        params: ReviewParams,
        second_model: &str,
    ) -> Result<ComparisonResult, DomainError> {
        let first_model = self.resolve_model(params.model.as_deref())?;
        let second_model = self.resolve_model(Some(second_model))?;
        let request = Self::request(&params)?;
        let exemplars = self.exemplars(&request).await?;

        let (first, second) = tokio::join!(
            self.run(&first_model, request.clone(), &exemplars),
            self.run(&second_model, request, &exemplars),
        );

        Ok(ComparisonResult { first, second })
    }

    fn request(params: &ReviewParams) -> Result<GenerationRequest, DomainError> {
        let rating = Rating::new(params.rating)
            .map_err(|_| DomainError::validation(messages::INVALID_RATING))?;

        GenerationRequest::new(&params.theme, rating, &params.category, Vec::new())
            .map_err(|_| DomainError::validation(messages::EMPTY_FIELDS))
    }

    async fn exemplars(&self, request: &GenerationRequest) -> Result<ExemplarSet, DomainError> {
        let exemplars = self
            .store
            .find_examples(request.category(), request.rating(), self.examples_limit)
            .await?;

        info!(
            store = self.store.store_name(),
            category = %request.category(),
            rating = request.rating().value(),
            found = exemplars.reviews.len(),
            exact_match = exemplars.exact_match,
            "Exemplars loaded"
        );

        Ok(exemplars)
    }

    async fn run(
        &self,
        model: &str,
        request: GenerationRequest,
        exemplars: &ExemplarSet,
    ) -> ReviewResult {
        if exemplars.is_empty() {
            warn!(category = %request.category(), "No exemplars for category, skipping generation");
            return ReviewResult {
                model: model.to_string(),
                outcome: GenerationOutcome::no_data(),
                exact_match: false,
                examples: Vec::new(),
                metrics: None,
            };
        }

        let request = request.with_examples(exemplars.reviews.clone());
        let outcome = self.generator(model).generate(request).await;

        let metrics = match (&self.scorer, outcome.review.as_deref()) {
            (Some(scorer), Some(review)) => scorer.score(review, &exemplars.reviews).await,
            _ => None,
        };

        ReviewResult {
            model: model.to_string(),
            outcome,
            exact_match: exemplars.exact_match,
            examples: exemplars.reviews.clone(),
            metrics,
        }
    }
}
