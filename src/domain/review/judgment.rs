//! Structured judgments produced by the validation and self-check steps

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Reason a theme was rejected by the validation step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidationErrorType {
    NonRussian,
    Nsfw,
    Irrelevant,
    Gibberish,
    /// Any value the model invented outside the known set
    Other(String),
}

impl ValidationErrorType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NonRussian => "non_russian",
            Self::Nsfw => "nsfw",
            Self::Irrelevant => "irrelevant",
            Self::Gibberish => "gibberish",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ValidationErrorType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "non_russian" => Self::NonRussian,
            "nsfw" => Self::Nsfw,
            "irrelevant" => Self::Irrelevant,
            "gibberish" => Self::Gibberish,
            _ => Self::Other(raw),
        }
    }
}

impl From<ValidationErrorType> for String {
    fn from(error_type: ValidationErrorType) -> Self {
        error_type.as_str().to_string()
    }
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the validation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub error_type: Option<ValidationErrorType>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_type: None,
        }
    }

    pub fn rejected(error_type: ValidationErrorType) -> Self {
        Self {
            is_valid: false,
            error_type: Some(error_type),
        }
    }
}

/// Verdict of the self-check step; anything but "accept" is a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Accept,
    Reject,
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        if raw.trim().eq_ignore_ascii_case("accept") {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Accept => "accept".to_string(),
            Verdict::Reject => "reject".to_string(),
        }
    }
}

/// One of the five axes scored by the self-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityDimension {
    ThemeRelevance,
    RatingMatch,
    LanguageQuality,
    Consistency,
    CategorySpecificity,
}

impl QualityDimension {
    pub const ALL: [QualityDimension; 5] = [
        Self::ThemeRelevance,
        Self::RatingMatch,
        Self::LanguageQuality,
        Self::Consistency,
        Self::CategorySpecificity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThemeRelevance => "theme_relevance",
            Self::RatingMatch => "rating_match",
            Self::LanguageQuality => "language_quality",
            Self::Consistency => "consistency",
            Self::CategorySpecificity => "category_specificity",
        }
    }
}

impl fmt::Display for QualityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MAX_SCORE: u8 = 10;

/// Integer 0..=10 score per quality dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityScores {
    #[serde(deserialize_with = "score")]
    pub theme_relevance: u8,
    #[serde(deserialize_with = "score")]
    pub rating_match: u8,
    #[serde(deserialize_with = "score")]
    pub language_quality: u8,
    #[serde(deserialize_with = "score")]
    pub consistency: u8,
    #[serde(deserialize_with = "score")]
    pub category_specificity: u8,
}

/// Accepts any whole JSON number in 0..=10, so `8` and `8.0` both decode
fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;

    if raw.fract() != 0.0 || !(0.0..=f64::from(MAX_SCORE)).contains(&raw) {
        return Err(de::Error::custom(format!(
            "score {raw} is not a whole number between 0 and {MAX_SCORE}"
        )));
    }

    Ok(raw as u8)
}

impl QualityScores {
    /// All five dimensions at the same score
    pub fn uniform(score: u8) -> Self {
        Self {
            theme_relevance: score,
            rating_match: score,
            language_quality: score,
            consistency: score,
            category_specificity: score,
        }
    }

    pub fn get(&self, dimension: QualityDimension) -> u8 {
        match dimension {
            QualityDimension::ThemeRelevance => self.theme_relevance,
            QualityDimension::RatingMatch => self.rating_match,
            QualityDimension::LanguageQuality => self.language_quality,
            QualityDimension::Consistency => self.consistency,
            QualityDimension::CategorySpecificity => self.category_specificity,
        }
    }

    pub fn with(mut self, dimension: QualityDimension, score: u8) -> Self {
        match dimension {
            QualityDimension::ThemeRelevance => self.theme_relevance = score,
            QualityDimension::RatingMatch => self.rating_match = score,
            QualityDimension::LanguageQuality => self.language_quality = score,
            QualityDimension::Consistency => self.consistency = score,
            QualityDimension::CategorySpecificity => self.category_specificity = score,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (QualityDimension, u8)> + '_ {
        QualityDimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

/// Outcome of the self-check step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub verdict: Verdict,
    pub scores: QualityScores,
}

impl CheckResult {
    pub fn new(verdict: Verdict, scores: QualityScores) -> Self {
        Self { verdict, scores }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_known_error_type() {
        let result: ValidationResult =
            serde_json::from_str(r#"{"is_valid": false, "error_type": "nsfw"}"#).unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.error_type, Some(ValidationErrorType::Nsfw));
    }

    #[test]
    fn test_validation_result_null_or_missing_error_type() {
        let with_null: ValidationResult =
            serde_json::from_str(r#"{"is_valid": true, "error_type": null}"#).unwrap();
        let without: ValidationResult = serde_json::from_str(r#"{"is_valid": true}"#).unwrap();

        assert_eq!(with_null, ValidationResult::valid());
        assert_eq!(without, ValidationResult::valid());
    }

    #[test]
    fn test_unknown_error_type_is_preserved() {
        let result: ValidationResult =
            serde_json::from_str(r#"{"is_valid": false, "error_type": "spam"}"#).unwrap();

        assert_eq!(
            result.error_type,
            Some(ValidationErrorType::Other("spam".to_string()))
        );
    }

    #[test]
    fn test_check_result_parsing() {
        let result: CheckResult = serde_json::from_str(
            r#"{"verdict": "Accept", "scores": {"theme_relevance": 9, "rating_match": 8,
                "language_quality": 10, "consistency": 7, "category_specificity": 8}}"#,
        )
        .unwrap();

        assert!(result.is_accepted());
        assert_eq!(result.scores.get(QualityDimension::Consistency), 7);
        assert_eq!(result.scores.iter().count(), 5);
    }

    #[test]
    fn test_unrecognized_verdict_is_reject() {
        let verdict: Verdict = serde_json::from_str(r#""maybe""#).unwrap();
        assert_eq!(verdict, Verdict::Reject);
    }

    #[test]
    fn test_check_result_missing_dimension_fails() {
        let result = serde_json::from_str::<CheckResult>(
            r#"{"verdict": "accept", "scores": {"theme_relevance": 9}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_check_result_out_of_range_score_fails() {
        let result = serde_json::from_str::<CheckResult>(
            r#"{"verdict": "reject", "scores": {"theme_relevance": 200, "rating_match": 99,
                "language_quality": 50, "consistency": 11, "category_specificity": 42}}"#,
        );

        let error = result.unwrap_err().to_string();
        assert!(error.contains("between 0 and 10"), "{error}");
    }

    #[test]
    fn test_check_result_score_bounds() {
        let scores = |value: &str| {
            serde_json::from_str::<QualityScores>(&format!(
                r#"{{"theme_relevance": {value}, "rating_match": 5, "language_quality": 5,
                    "consistency": 5, "category_specificity": 5}}"#
            ))
        };

        assert_eq!(scores("0").unwrap().theme_relevance, 0);
        assert_eq!(scores("10").unwrap().theme_relevance, 10);
        assert!(scores("11").is_err());
        assert!(scores("-1").is_err());
        assert!(scores("\"8\"").is_err());
    }

    #[test]
    fn test_whole_float_scores_are_accepted() {
        let result: CheckResult = serde_json::from_str(
            r#"{"verdict": "accept", "scores": {"theme_relevance": 8.0, "rating_match": 9,
                "language_quality": 10.0, "consistency": 7, "category_specificity": 8}}"#,
        )
        .unwrap();

        assert_eq!(result.scores.theme_relevance, 8);
        assert_eq!(result.scores.language_quality, 10);
    }

    #[test]
    fn test_fractional_score_fails() {
        let result = serde_json::from_str::<CheckResult>(
            r#"{"verdict": "accept", "scores": {"theme_relevance": 7.5, "rating_match": 9,
                "language_quality": 10, "consistency": 7, "category_specificity": 8}}"#,
        );
        assert!(result.is_err());
    }
}
