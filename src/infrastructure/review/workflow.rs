//! Driver for the validate, generate and check state machine

use std::sync::Arc;

use tracing::{debug, info};

use super::parser::parse_reply;
use crate::domain::{
    CheckResult, GenerationError, ReviewPrompts, ValidationResult, WorkflowNode, WorkflowPolicy,
    WorkflowState,
};
use crate::infrastructure::llm::ModelClient;

/// Executes workflow nodes against one model until `End`
#[derive(Debug, Clone)]
pub struct ReviewWorkflow {
    client: ModelClient,
    prompts: Arc<ReviewPrompts>,
    policy: WorkflowPolicy,
}

impl ReviewWorkflow {
    pub fn new(client: ModelClient, prompts: Arc<ReviewPrompts>, policy: WorkflowPolicy) -> Self {
        Self {
            client,
            prompts,
            policy,
        }
    }

    pub fn policy(&self) -> &WorkflowPolicy {
        &self.policy
    }

    /// Run from `Validate` to `End`. The first failing step aborts the run and
    /// leaves `state` as it was after the last completed step.
    pub async fn run(&self, model: &str, state: &mut WorkflowState) -> Result<(), GenerationError> {
        let mut node = WorkflowNode::Validate;

        while node != WorkflowNode::End {
            self.execute(node, model, state).await?;
            let next = self.policy.transition(node, state);
            debug!(from = %node, to = %next, attempt = state.attempt_count(), "Workflow transition");
            node = next;
        }

        Ok(())
    }

    async fn execute(
        &self,
        node: WorkflowNode,
        model: &str,
        state: &mut WorkflowState,
    ) -> Result<(), GenerationError> {
        match node {
            WorkflowNode::Validate => self.validate(model, state).await,
            WorkflowNode::Generate => self.generate(model, state).await,
            WorkflowNode::Check => self.check(model, state).await,
            WorkflowNode::End => Ok(()),
        }
    }

    async fn validate(&self, model: &str, state: &mut WorkflowState) -> Result<(), GenerationError> {
        let prompt = self.prompts.validation(state.request().theme())?;
        let reply = self.client.complete(model, &prompt).await?;
        let result: ValidationResult = parse_reply(&reply, WorkflowNode::Validate.as_str())?;

        info!(
            is_valid = result.is_valid,
            error_type = result.error_type.as_ref().map(|t| t.as_str()),
            "Theme validated"
        );

        state.record_validation(result);
        Ok(())
    }

    async fn generate(&self, model: &str, state: &mut WorkflowState) -> Result<(), GenerationError> {
        let prompt = self.prompts.generation(state.request())?;
        let review = self.client.complete(model, &prompt).await?;

        debug!(
            attempt = state.attempt_count() + 1,
            chars = review.chars().count(),
            "Review generated"
        );

        state.record_review(review);
        Ok(())
    }

    async fn check(&self, model: &str, state: &mut WorkflowState) -> Result<(), GenerationError> {
        let review = state.generated_review().unwrap_or_default();
        let prompt = self.prompts.self_check(review, state.request())?;
        let reply = self.client.complete(model, &prompt).await?;
        let result: CheckResult = parse_reply(&reply, WorkflowNode::Check.as_str())?;

        let failing = self.policy.threshold.failing_dimensions(&result.scores);
        info!(
            attempt = state.attempt_count() + 1,
            verdict = ?result.verdict,
            failing = ?failing,
            "Review checked"
        );

        state.record_check(result);
        Ok(())
    }
}
