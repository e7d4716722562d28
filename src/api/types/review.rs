//! Request and response bodies for the review endpoints

use serde::{Deserialize, Serialize};

use crate::config::ModelOption;
use crate::infrastructure::review::ReviewParams;

/// POST /v1/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReviewRequest {
    pub theme: String,
    pub rating: u8,
    pub category: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl From<GenerateReviewRequest> for ReviewParams {
    fn from(body: GenerateReviewRequest) -> Self {
        Self {
            theme: body.theme,
            rating: body.rating,
            category: body.category,
            model: body.model,
        }
    }
}

/// POST /v1/reviews/compare
#[derive(Debug, Clone, Deserialize)]
pub struct CompareReviewsRequest {
    #[serde(flatten)]
    pub review: GenerateReviewRequest,
    pub second_model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiModel {
    pub id: String,
    pub name: String,
    pub default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<ApiModel>,
}

impl ModelsResponse {
    pub fn from_catalogue(models: &[ModelOption], default_model: &str) -> Self {
        Self {
            default_model: default_model.to_string(),
            models: models
                .iter()
                .map(|m| ApiModel {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    default: m.id == default_model,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_request_flattens_review_fields() {
        let body: CompareReviewsRequest = serde_json::from_str(
            r#"{"theme": "кофе", "rating": 5, "category": "Кафе", "second_model": "openai/gpt-4-turbo"}"#,
        )
        .unwrap();

        assert_eq!(body.review.theme, "кофе");
        assert_eq!(body.review.model, None);
        assert_eq!(body.second_model, "openai/gpt-4-turbo");
    }

    #[test]
    fn test_models_response_marks_default() {
        let models = vec![
            ModelOption::new("a/one", "One"),
            ModelOption::new("b/two", "Two"),
        ];
        let response = ModelsResponse::from_catalogue(&models, "b/two");

        assert!(!response.models[0].default);
        assert!(response.models[1].default);
        assert_eq!(response.default_model, "b/two");
    }
}
