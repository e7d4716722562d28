//! Policy boundary around the review workflow

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use super::workflow::ReviewWorkflow;
use crate::domain::review::messages;
use crate::domain::{
    GenerationOutcome, GenerationRequest, Rating, ReviewPrompts, WorkflowPolicy, WorkflowState,
};
use crate::infrastructure::llm::ModelClient;

/// Generates reviews with one model and folds every run into a `GenerationOutcome`
#[derive(Debug, Clone)]
pub struct ReviewGenerator {
    workflow: ReviewWorkflow,
    model: String,
}

impl ReviewGenerator {
    pub fn new(
        client: ModelClient,
        prompts: Arc<ReviewPrompts>,
        policy: WorkflowPolicy,
        model: impl Into<String>,
    ) -> Self {
        Self {
            workflow: ReviewWorkflow::new(client, prompts, policy),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the workflow to completion. Never fails: model and decoding errors
    /// become a `Failed` outcome carrying the error detail.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationOutcome {
        let span = info_span!(
            "review_workflow",
            model = %self.model,
            category = %request.category(),
            rating = request.rating().value()
        );

        async move {
            let mut state = WorkflowState::new(request);

            match self.workflow.run(&self.model, &mut state).await {
                Ok(()) => {
                    let outcome = self.conclude(state);
                    info!(kind = ?outcome.kind, attempts = outcome.attempts, "Generation finished");
                    outcome
                }
                Err(error) => {
                    warn!(error = %error, attempts = state.attempt_count(), "Generation failed");
                    GenerationOutcome::failed(error, state.attempt_count())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Unvalidated entry point returning the `(review, message)` pair
    pub async fn generate_review(
        &self,
        theme: &str,
        rating: u8,
        category: &str,
        example_reviews: Vec<String>,
    ) -> (Option<String>, Option<String>) {
        let Ok(rating) = Rating::new(rating) else {
            return GenerationOutcome::invalid_input(messages::INVALID_RATING).into_tuple();
        };

        match GenerationRequest::new(theme, rating, category, example_reviews) {
            Ok(request) => self.generate(request).await.into_tuple(),
            Err(_) => GenerationOutcome::invalid_input(messages::EMPTY_FIELDS).into_tuple(),
        }
    }

    fn conclude(&self, state: WorkflowState) -> GenerationOutcome {
        if let Some(validation) = state.validation_result() {
            if !validation.is_valid {
                return GenerationOutcome::rejected(validation.error_type.clone());
            }
        }

        let attempts = state.attempt_count();
        let accepted = state.check_result().is_some_and(|c| c.is_accepted());
        let cap_reached = self.workflow.policy().cap_reached(&state);

        match state.into_generated_review() {
            Some(review) if accepted => GenerationOutcome::accepted(review, attempts),
            review if cap_reached => GenerationOutcome::degraded(review, attempts),
            _ => GenerationOutcome::check_failed(attempts),
        }
    }
}
