//! Review generation handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::api::middleware::RateLimited;
use crate::api::state::AppState;
use crate::api::types::{ApiError, CompareReviewsRequest, GenerateReviewRequest};
use crate::infrastructure::review::{ComparisonResult, ReviewResult};

const COMPARE_COST: u32 = 2;

/// POST /v1/reviews
///
/// Workflow outcomes, including rejected themes and upstream failures, are
/// returned as 200 with `review: null` and a user-facing `message`.
pub async fn generate_review(
    State(state): State<AppState>,
    RateLimited(client): RateLimited,
    payload: Result<Json<GenerateReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResult>, ApiError> {
    let Json(body) = payload?;

    info!(
        client = %client.0,
        category = %body.category,
        rating = body.rating,
        model = body.model.as_deref().unwrap_or("default"),
        "Review requested"
    );

    let result = state.review_service.generate(body.into()).await?;
    Ok(Json(result))
}

/// POST /v1/reviews/compare
///
/// Runs two full workflows, so it takes two rate limit slots.
pub async fn compare_reviews(
    State(state): State<AppState>,
    RateLimited(client): RateLimited<COMPARE_COST>,
    payload: Result<Json<CompareReviewsRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let Json(body) = payload?;

    info!(
        client = %client.0,
        category = %body.review.category,
        second_model = %body.second_model,
        "Review comparison requested"
    );

    let result = state
        .review_service
        .compare(body.review.into(), &body.second_model)
        .await?;
    Ok(Json(result))
}
