use async_trait::async_trait;

use super::ExemplarSet;
use crate::domain::error::DomainError;
use crate::domain::review::Rating;

#[cfg(test)]
use mockall::automock;

/// Read-only lookup of categories and exemplar reviews
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExemplarStore: Send + Sync {
    /// All category names, sorted
    async fn list_categories(&self) -> Result<Vec<String>, DomainError>;

    /// Up to `limit` reviews in `category` with `rating`; when none exist,
    /// random reviews of the same category regardless of rating
    async fn find_examples(
        &self,
        category: &str,
        rating: Rating,
        limit: usize,
    ) -> Result<ExemplarSet, DomainError>;

    /// Backend name for logs
    fn store_name(&self) -> &'static str;
}
