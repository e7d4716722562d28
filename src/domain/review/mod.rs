//! Review generation domain: inputs, judgments, state machine and outcomes

mod error;
mod judgment;
pub mod messages;
mod outcome;
mod request;
mod state;
mod threshold;

pub use error::GenerationError;
pub use judgment::{
    CheckResult, QualityDimension, QualityScores, ValidationErrorType, ValidationResult, Verdict,
};
pub use outcome::{GenerationOutcome, OutcomeKind};
pub use request::{GenerationRequest, Rating};
pub use state::{WorkflowNode, WorkflowPolicy, WorkflowState};
pub use threshold::QualityThreshold;
