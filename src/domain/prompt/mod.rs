//! Prompt templates for the review workflow

mod review_prompts;
mod template;

pub use review_prompts::{
    format_examples, LengthBounds, ReviewPrompts, GENERATION_PROMPT, NO_EXAMPLES_PLACEHOLDER,
    SELF_CHECK_PROMPT, VALIDATION_PROMPT,
};
pub use template::{PromptTemplate, PromptVariable, TemplateError};
