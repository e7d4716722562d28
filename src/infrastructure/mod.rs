//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod exemplar;
pub mod llm;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod review;
