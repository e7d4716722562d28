use serde::{Deserialize, Serialize};

use crate::domain::review::Rating;

/// A real review as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReview {
    pub text: String,
    pub rating: Rating,
    #[serde(default)]
    pub rubrics: Vec<String>,
}

impl StoredReview {
    pub fn new(text: impl Into<String>, rating: Rating, rubrics: Vec<String>) -> Self {
        Self {
            text: text.into(),
            rating,
            rubrics,
        }
    }

    pub fn has_rubric(&self, category: &str) -> bool {
        self.rubrics.iter().any(|r| r == category)
    }
}

/// Exemplars returned for one lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExemplarSet {
    pub reviews: Vec<String>,
    /// True when every review matched both category and rating
    pub exact_match: bool,
}

impl ExemplarSet {
    pub fn exact(reviews: Vec<String>) -> Self {
        Self {
            reviews,
            exact_match: true,
        }
    }

    pub fn fallback(reviews: Vec<String>) -> Self {
        Self {
            reviews,
            exact_match: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
