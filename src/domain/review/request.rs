//! Generation request and rating value types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Star rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable input of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    theme: String,
    rating: Rating,
    category: String,
    example_reviews: Vec<String>,
}

impl GenerationRequest {
    /// Build a request; theme and category must contain non-whitespace text
    pub fn new(
        theme: impl Into<String>,
        rating: Rating,
        category: impl Into<String>,
        example_reviews: Vec<String>,
    ) -> Result<Self, DomainError> {
        let theme = theme.into().trim().to_string();
        let category = category.into().trim().to_string();

        if theme.is_empty() {
            return Err(DomainError::validation("Theme must not be empty"));
        }

        if category.is_empty() {
            return Err(DomainError::validation("Category must not be empty"));
        }

        Ok(Self {
            theme,
            rating,
            category,
            example_reviews,
        })
    }

    /// Replace the exemplar reviews, keeping the validated fields
    pub fn with_examples(mut self, example_reviews: Vec<String>) -> Self {
        self.example_reviews = example_reviews;
        self
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn example_reviews(&self) -> &[String] {
        &self.example_reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_rating_deserialization_is_checked() {
        let rating: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(rating.value(), 3);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_request_trims_fields() {
        let request =
            GenerationRequest::new("  вкусный завтрак ", Rating::new(5).unwrap(), " Кафе ", vec![])
                .unwrap();

        assert_eq!(request.theme(), "вкусный завтрак");
        assert_eq!(request.category(), "Кафе");
        assert!(request.example_reviews().is_empty());
    }

    #[test]
    fn test_request_rejects_blank_theme_or_category() {
        let rating = Rating::new(3).unwrap();

        assert!(GenerationRequest::new("   ", rating, "Кафе", vec![]).is_err());
        assert!(GenerationRequest::new("парковка", rating, "", vec![]).is_err());
    }
}
