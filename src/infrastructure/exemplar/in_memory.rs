//! In-memory exemplar store, optionally seeded from a JSON file

use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::{DomainError, ExemplarSet, ExemplarStore, Rating, StoredReview};

/// Exemplar store holding all reviews in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryExemplarStore {
    reviews: Vec<StoredReview>,
}

impl InMemoryExemplarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_review(mut self, review: StoredReview) -> Self {
        self.reviews.push(review);
        self
    }

    pub fn with_reviews(mut self, reviews: impl IntoIterator<Item = StoredReview>) -> Self {
        self.reviews.extend(reviews);
        self
    }

    /// Load a JSON array of `{text, rating, rubrics}` records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DomainError> {
        let reviews: Vec<StoredReview> = serde_json::from_str(content)
            .map_err(|e| DomainError::storage(format!("Invalid review seed data: {}", e)))?;

        Ok(Self::new().with_reviews(reviews))
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Up to `limit` distinct texts matching `filter`, in random order
    fn sample(&self, limit: usize, predicate: impl Fn(&StoredReview) -> bool) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut candidates: Vec<&str> = self
            .reviews
            .iter()
            .filter(|r| predicate(r))
            .map(|r| r.text.as_str())
            .filter(|text| seen.insert(*text))
            .collect();

        candidates.shuffle(&mut rand::thread_rng());
        candidates.truncate(limit);
        candidates.into_iter().map(str::to_string).collect()
    }
}

#[async_trait]
impl ExemplarStore for InMemoryExemplarStore {
    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        let categories: BTreeSet<&str> = self
            .reviews
            .iter()
            .flat_map(|r| r.rubrics.iter().map(String::as_str))
            .collect();

        Ok(categories.into_iter().map(str::to_string).collect())
    }

    async fn find_examples(
        &self,
        category: &str,
        rating: Rating,
        limit: usize,
    ) -> Result<ExemplarSet, DomainError> {
        let exact = self.sample(limit, |r| r.has_rubric(category) && r.rating == rating);
        if !exact.is_empty() {
            return Ok(ExemplarSet::exact(exact));
        }

        Ok(ExemplarSet::fallback(
            self.sample(limit, |r| r.has_rubric(category)),
        ))
    }

    fn store_name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn review(text: &str, rating: u8, rubric: &str) -> StoredReview {
        StoredReview::new(text, Rating::new(rating).unwrap(), vec![rubric.to_string()])
    }

    fn store() -> InMemoryExemplarStore {
        InMemoryExemplarStore::new().with_reviews([
            review("Лучший кофе в городе", 5, "Кафе"),
            review("Уютно и тихо", 5, "Кафе"),
            review("Долго ждали заказ", 2, "Кафе"),
            review("Хорошие врачи", 4, "Стоматология"),
        ])
    }

    #[tokio::test]
    async fn test_categories_sorted_and_unique() {
        let categories = store().list_categories().await.unwrap();
        assert_eq!(categories, vec!["Кафе", "Стоматология"]);
    }

    #[tokio::test]
    async fn test_exact_match() {
        let set = store()
            .find_examples("Кафе", Rating::new(5).unwrap(), 10)
            .await
            .unwrap();

        assert!(set.exact_match);
        assert_eq!(set.reviews.len(), 2);
        assert!(!set.reviews.contains(&"Долго ждали заказ".to_string()));
    }

    #[tokio::test]
    async fn test_limit_applies() {
        let set = store()
            .find_examples("Кафе", Rating::new(5).unwrap(), 1)
            .await
            .unwrap();

        assert_eq!(set.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_ignores_rating() {
        let set = store()
            .find_examples("Кафе", Rating::new(3).unwrap(), 10)
            .await
            .unwrap();

        assert!(!set.exact_match);
        assert_eq!(set.reviews.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_category_is_empty_fallback() {
        let set = store()
            .find_examples("Автосервис", Rating::new(3).unwrap(), 10)
            .await
            .unwrap();

        assert!(!set.exact_match);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_texts_returned_once() {
        let store = InMemoryExemplarStore::new().with_reviews([
            review("Отлично", 5, "Кафе"),
            review("Отлично", 5, "Кафе"),
        ]);

        let set = store
            .find_examples("Кафе", Rating::new(5).unwrap(), 10)
            .await
            .unwrap();
        assert_eq!(set.reviews, vec!["Отлично".to_string()]);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "Вкусная шаурма", "rating": 5, "rubrics": ["Быстрое питание"]}}]"#
        )
        .unwrap();

        let store = InMemoryExemplarStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_seed_data() {
        let result = InMemoryExemplarStore::from_json(r#"[{"text": "x", "rating": 9}]"#);
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
