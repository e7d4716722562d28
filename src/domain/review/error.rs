use thiserror::Error;

use crate::domain::prompt::TemplateError;
use crate::domain::DomainError;

/// Failures that abort a generation run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    /// Transport or upstream failure of a model call
    #[error("API error: {message}")]
    Api { message: String },

    /// Model reply could not be decoded, even after repair
    #[error("Failed to parse {step} response: {message}")]
    Parse {
        step: String,
        raw: String,
        repaired: String,
        message: String,
    },

    #[error("Prompt error: {0}")]
    Prompt(#[from] TemplateError),
}

impl GenerationError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn parse(
        step: impl Into<String>,
        raw: impl Into<String>,
        repaired: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            step: step.into(),
            raw: raw.into(),
            repaired: repaired.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for GenerationError {
    fn from(error: DomainError) -> Self {
        Self::api(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_maps_to_api() {
        let error: GenerationError = DomainError::provider("openrouter", "HTTP 500").into();
        assert_eq!(
            error,
            GenerationError::api("Provider error: openrouter - HTTP 500")
        );
    }

    #[test]
    fn test_parse_error_display() {
        let error = GenerationError::parse("check", "{oops", "{oops", "EOF while parsing");
        assert_eq!(
            error.to_string(),
            "Failed to parse check response: EOF while parsing"
        );
    }
}
