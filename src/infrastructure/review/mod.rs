//! Review generation: reply parsing, workflow driver, generator and service

mod generator;
pub mod parser;
mod service;
mod workflow;

pub use generator::ReviewGenerator;
pub use service::{ComparisonResult, ReviewParams, ReviewResult, ReviewService};
pub use workflow::ReviewWorkflow;
