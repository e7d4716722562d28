//! HTTP request/response types

mod error;
mod review;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use review::{
    ApiModel, CategoriesResponse, CompareReviewsRequest, GenerateReviewRequest, ModelsResponse,
};
