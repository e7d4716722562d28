//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::rate_limit::RateLimiter;
use crate::infrastructure::review::ReviewService;

/// Long-lived services shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub review_service: Arc<ReviewService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(review_service: Arc<ReviewService>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            review_service,
            rate_limiter,
        }
    }
}
