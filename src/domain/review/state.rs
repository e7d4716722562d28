//! Workflow state and the pure transition function driving it

use std::fmt;

use super::judgment::{CheckResult, ValidationResult};
use super::request::GenerationRequest;
use super::threshold::QualityThreshold;

/// Node of the generation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowNode {
    Validate,
    Generate,
    Check,
    End,
}

impl WorkflowNode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Generate => "generate",
            Self::Check => "check",
            Self::End => "end",
        }
    }
}

impl fmt::Display for WorkflowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable record threaded through one workflow execution
#[derive(Debug, Clone)]
pub struct WorkflowState {
    request: GenerationRequest,
    attempt_count: u32,
    validation_result: Option<ValidationResult>,
    generated_review: Option<String>,
    check_result: Option<CheckResult>,
}

impl WorkflowState {
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            attempt_count: 0,
            validation_result: None,
            generated_review: None,
            check_result: None,
        }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn validation_result(&self) -> Option<&ValidationResult> {
        self.validation_result.as_ref()
    }

    pub fn generated_review(&self) -> Option<&str> {
        self.generated_review.as_deref()
    }

    pub fn check_result(&self) -> Option<&CheckResult> {
        self.check_result.as_ref()
    }

    pub fn record_validation(&mut self, result: ValidationResult) {
        self.validation_result = Some(result);
    }

    pub fn record_review(&mut self, review: String) {
        self.generated_review = Some(review);
    }

    /// Store a self-check judgment; the only place attempts are counted
    pub fn record_check(&mut self, result: CheckResult) {
        self.check_result = Some(result);
        self.attempt_count += 1;
    }

    pub fn into_generated_review(self) -> Option<String> {
        self.generated_review
    }
}

/// Routing policy: quality gate plus attempt cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPolicy {
    pub threshold: QualityThreshold,
    pub max_attempts: u32,
}

impl WorkflowPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    pub fn new(threshold: QualityThreshold, max_attempts: u32) -> Self {
        Self {
            threshold,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn cap_reached(&self, state: &WorkflowState) -> bool {
        state.attempt_count() >= self.max_attempts
    }

    /// Next node after `node` has executed against `state`
    pub fn transition(&self, node: WorkflowNode, state: &WorkflowState) -> WorkflowNode {
        match node {
            WorkflowNode::Validate => match state.validation_result() {
                Some(result) if result.is_valid => WorkflowNode::Generate,
                _ => WorkflowNode::End,
            },
            WorkflowNode::Generate => WorkflowNode::Check,
            WorkflowNode::Check => {
                let passed = state
                    .check_result()
                    .is_some_and(|check| self.threshold.passes(&check.scores));

                if self.cap_reached(state) || passed {
                    WorkflowNode::End
                } else {
                    WorkflowNode::Generate
                }
            }
            WorkflowNode::End => WorkflowNode::End,
        }
    }
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self::new(QualityThreshold::default(), Self::DEFAULT_MAX_ATTEMPTS)
    }
}
