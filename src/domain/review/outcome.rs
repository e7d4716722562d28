use serde::Serialize;

use super::judgment::ValidationErrorType;
use super::messages;

/// How a generation run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Self-check accepted the review
    Accepted,
    /// Attempts exhausted; best effort review returned with a warning
    Degraded,
    /// Validation judged the theme unusable
    Rejected(Option<ValidationErrorType>),
    /// Workflow ended without acceptance before the cap
    CheckFailed,
    /// Request fields were blank or out of range; no model was called
    InvalidInput,
    /// A model call or reply decoding failed
    Failed,
    /// No exemplars exist for the category; nothing was generated
    NoData,
}

/// Two-part result handed back to the caller, plus bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub review: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub kind: OutcomeKind,
    pub attempts: u32,
}

impl GenerationOutcome {
    pub fn accepted(review: String, attempts: u32) -> Self {
        Self {
            review: Some(review),
            message: None,
            kind: OutcomeKind::Accepted,
            attempts,
        }
    }

    pub fn degraded(review: Option<String>, attempts: u32) -> Self {
        Self {
            review,
            message: Some(messages::DEGRADED_QUALITY.to_string()),
            kind: OutcomeKind::Degraded,
            attempts,
        }
    }

    pub fn rejected(error_type: Option<ValidationErrorType>) -> Self {
        Self {
            review: None,
            message: Some(messages::validation_message(error_type.as_ref()).to_string()),
            kind: OutcomeKind::Rejected(error_type),
            attempts: 0,
        }
    }

    pub fn check_failed(attempts: u32) -> Self {
        Self {
            review: None,
            message: Some(messages::VALIDATION_FAILED.to_string()),
            kind: OutcomeKind::CheckFailed,
            attempts,
        }
    }

    pub fn failed(detail: impl std::fmt::Display, attempts: u32) -> Self {
        Self {
            review: None,
            message: Some(messages::api_error_message(detail)),
            kind: OutcomeKind::Failed,
            attempts,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            review: None,
            message: Some(message.into()),
            kind: OutcomeKind::InvalidInput,
            attempts: 0,
        }
    }

    pub fn no_data() -> Self {
        Self {
            review: None,
            message: Some(messages::NO_DATA.to_string()),
            kind: OutcomeKind::NoData,
            attempts: 0,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.kind == OutcomeKind::Accepted
    }

    /// The `(review, message)` pair
    pub fn into_tuple(self) -> (Option<String>, Option<String>) {
        (self.review, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_has_no_message() {
        let outcome = GenerationOutcome::accepted("Отличный сервис".into(), 1);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.into_tuple(), (Some("Отличный сервис".into()), None));
    }

    #[test]
    fn test_rejected_maps_message() {
        let outcome = GenerationOutcome::rejected(Some(ValidationErrorType::Irrelevant));
        assert_eq!(outcome.attempts, 0);
        assert_eq!(outcome.message.as_deref(), Some(messages::IRRELEVANT));
        assert!(outcome.review.is_none());
    }

    #[test]
    fn test_serialized_kind() {
        let outcome = GenerationOutcome::rejected(Some(ValidationErrorType::Nsfw));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "rejected");
        assert_eq!(json["reason"], "nsfw");
    }
}
