//! Caller identity and per-identity rate limiting extractors

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::review::messages;

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Who is calling: `x-client-id`, else the first `x-forwarded-for` hop,
/// else "anonymous"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let identity = header(CLIENT_ID_HEADER)
            .or_else(|| {
                header(FORWARDED_FOR_HEADER)
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            })
            .unwrap_or(ANONYMOUS_IDENTITY);

        Self(identity.to_string())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Extractor that records the request against the caller's window and
/// rejects with 429 once the window is full. `COST` is the number of slots
/// the request takes.
#[derive(Debug, Clone)]
pub struct RateLimited<const COST: u32 = 1>(pub ClientIdentity);

impl<const COST: u32> FromRequestParts<AppState> for RateLimited<COST> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = ClientIdentity::from_headers(&parts.headers);
        let result = state
            .rate_limiter
            .check_and_record_weighted(&identity.0, COST)
            .await;

        if !result.allowed {
            warn!(
                identity = %identity.0,
                limit = result.limit,
                cost = COST,
                retry_after_secs = result.retry_after.as_secs(),
                "Rate limit exceeded"
            );
            return Err(ApiError::rate_limited(messages::RATE_LIMITED)
                .with_code("rate_limit_exceeded")
                .with_retry_after(result.retry_after));
        }

        debug!(identity = %identity.0, remaining = result.remaining, "Rate limit check passed");

        Ok(Self(identity))
    }
}
