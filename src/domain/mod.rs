//! Domain layer - Core business logic and entities

pub mod embedding;
pub mod error;
pub mod exemplar;
pub mod llm;
pub mod prompt;
pub mod rate_limit;
pub mod review;

pub use embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use exemplar::{ExemplarSet, ExemplarStore, StoredReview};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use prompt::{LengthBounds, PromptTemplate, ReviewPrompts, TemplateError};
pub use rate_limit::RateLimitConfig;
pub use review::{
    CheckResult, GenerationError, GenerationOutcome, GenerationRequest, OutcomeKind,
    QualityDimension, QualityScores, QualityThreshold, Rating, ValidationErrorType,
    ValidationResult, Verdict, WorkflowNode, WorkflowPolicy, WorkflowState,
};
