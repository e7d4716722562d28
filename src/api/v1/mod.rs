//! v1 API endpoints

pub mod catalog;
pub mod reviews;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/models", get(catalog::list_models))
        .route("/reviews", post(reviews::generate_review))
        .route("/reviews/compare", post(reviews::compare_reviews))
}
