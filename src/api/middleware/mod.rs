//! HTTP middleware and request extractors

mod logging;
mod rate_limit;

pub use logging::logging_middleware;
pub use rate_limit::{ClientIdentity, RateLimited, ANONYMOUS_IDENTITY, CLIENT_ID_HEADER};
