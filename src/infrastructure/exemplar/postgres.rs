//! PostgreSQL exemplar store over the imported review corpus
//!
//! Expects the `rubrics`, `yareviews` and `review_rubrics` tables produced by
//! the corpus import. `yareviews.rating` is a double precision column.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::debug;

use crate::domain::{DomainError, ExemplarSet, ExemplarStore, Rating};

const CATEGORIES_QUERY: &str = "SELECT rubric_name FROM rubrics ORDER BY rubric_name";

// DISTINCT and ORDER BY RANDOM() cannot share one SELECT in PostgreSQL
const EXACT_QUERY: &str = r#"
    SELECT text FROM (
        SELECT DISTINCT r.text, r.rating
        FROM yareviews r
        JOIN review_rubrics rr ON r.review_id = rr.review_id
        JOIN rubrics rb ON rr.rubric_id = rb.rubric_id
        WHERE rb.rubric_name = $1
        AND r.rating = $2
    ) AS candidates
    ORDER BY RANDOM()
    LIMIT $3
"#;

const FALLBACK_QUERY: &str = r#"
    SELECT text FROM (
        SELECT DISTINCT r.text, r.rating
        FROM yareviews r
        JOIN review_rubrics rr ON r.review_id = rr.review_id
        JOIN rubrics rb ON rr.rubric_id = rb.rubric_id
        WHERE rb.rubric_name = $1
    ) AS candidates
    ORDER BY RANDOM()
    LIMIT $2
"#;

/// Exemplar store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PostgresExemplarStore {
    pool: PgPool,
}

impl PostgresExemplarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    async fn texts(
        &self,
        query: &'static str,
        category: &str,
        rating: Option<Rating>,
        limit: usize,
    ) -> Result<Vec<String>, DomainError> {
        let mut q = sqlx::query(query).bind(category);
        if let Some(rating) = rating {
            q = q.bind(f64::from(rating.value()));
        }

        let rows = q
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch reviews: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("text")
                    .map_err(|e| DomainError::storage(format!("Invalid review row: {}", e)))
            })
            .collect()
    }
}

#[async_trait]
impl ExemplarStore for PostgresExemplarStore {
    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(CATEGORIES_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list categories: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("rubric_name")
                    .map_err(|e| DomainError::storage(format!("Invalid rubric row: {}", e)))
            })
            .collect()
    }

    async fn find_examples(
        &self,
        category: &str,
        rating: Rating,
        limit: usize,
    ) -> Result<ExemplarSet, DomainError> {
        let exact = self.texts(EXACT_QUERY, category, Some(rating), limit).await?;
        if !exact.is_empty() {
            return Ok(ExemplarSet::exact(exact));
        }

        debug!(category = %category, rating = rating.value(), "No exact exemplars, using category fallback");
        let fallback = self.texts(FALLBACK_QUERY, category, None, limit).await?;
        Ok(ExemplarSet::fallback(fallback))
    }

    fn store_name(&self) -> &'static str {
        "postgres"
    }
}
