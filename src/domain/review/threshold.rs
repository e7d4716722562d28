use serde::{Deserialize, Serialize};

use super::judgment::{QualityDimension, QualityScores};

/// Minimum passing score per quality dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThreshold {
    pub theme_relevance: u8,
    pub rating_match: u8,
    pub language_quality: u8,
    pub consistency: u8,
    pub category_specificity: u8,
}

impl QualityThreshold {
    pub const DEFAULT_MINIMUM: u8 = 7;

    pub fn uniform(minimum: u8) -> Self {
        Self {
            theme_relevance: minimum,
            rating_match: minimum,
            language_quality: minimum,
            consistency: minimum,
            category_specificity: minimum,
        }
    }

    pub fn minimum(&self, dimension: QualityDimension) -> u8 {
        match dimension {
            QualityDimension::ThemeRelevance => self.theme_relevance,
            QualityDimension::RatingMatch => self.rating_match,
            QualityDimension::LanguageQuality => self.language_quality,
            QualityDimension::Consistency => self.consistency,
            QualityDimension::CategorySpecificity => self.category_specificity,
        }
    }

    /// Every dimension must individually reach its minimum
    pub fn passes(&self, scores: &QualityScores) -> bool {
        scores.iter().all(|(dimension, score)| score >= self.minimum(dimension))
    }

    pub fn failing_dimensions(&self, scores: &QualityScores) -> Vec<QualityDimension> {
        scores
            .iter()
            .filter(|(dimension, score)| *score < self.minimum(*dimension))
            .map(|(dimension, _)| dimension)
            .collect()
    }
}

impl Default for QualityThreshold {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_MINIMUM)
    }
}
