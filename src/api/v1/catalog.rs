//! Category and model catalogue handlers

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CategoriesResponse, ModelsResponse};

/// GET /v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.review_service.categories().await?;
    debug!(count = categories.len(), "Listing categories");

    Ok(Json(CategoriesResponse { categories }))
}

/// GET /v1/models
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let service = &state.review_service;
    Json(ModelsResponse::from_catalogue(
        service.models(),
        service.default_model(),
    ))
}
