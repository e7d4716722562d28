//! Display-only similarity between a generated review and its exemplars

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::lexical::{bleu, rouge, tokenize};
use crate::domain::{cosine_similarity, EmbeddingProvider, EmbeddingRequest};

/// Scores against one exemplar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceScores {
    pub bleu: f64,
    pub rouge: f64,
    pub lexical: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<f64>,
    pub combined: f64,
}

/// Per-exemplar scores and their averages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub references: Vec<ReferenceScores>,
    pub average: ReferenceScores,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[derive(Debug, Clone)]
struct SemanticScoring {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
}

/// Computes lexical (BLEU, ROUGE) and optional semantic similarity
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    semantic: Option<SemanticScoring>,
    lexical_weight: f64,
    semantic_weight: f64,
}

impl SimilarityScorer {
    pub fn lexical_only() -> Self {
        Self {
            semantic: None,
            lexical_weight: 1.0,
            semantic_weight: 0.0,
        }
    }

    pub fn with_embeddings(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        lexical_weight: f64,
        semantic_weight: f64,
    ) -> Self {
        Self {
            semantic: Some(SemanticScoring {
                provider,
                model: model.into(),
            }),
            lexical_weight: lexical_weight.max(0.0),
            semantic_weight: semantic_weight.max(0.0),
        }
    }

    /// Score `generated` against each reference; `None` when there are no references
    pub async fn score(&self, generated: &str, references: &[String]) -> Option<SimilarityReport> {
        if references.is_empty() {
            return None;
        }

        let semantic = self.semantic_scores(generated, references).await;
        let hypothesis = tokenize(generated);

        let scores: Vec<ReferenceScores> = references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                let reference = tokenize(reference);
                let semantic = semantic.as_ref().and_then(|s| s.get(i).copied());
                self.reference_scores(&hypothesis, &reference, semantic)
            })
            .collect();

        let average = ReferenceScores {
            bleu: round3(mean(scores.iter().map(|s| s.bleu))),
            rouge: round3(mean(scores.iter().map(|s| s.rouge))),
            lexical: round3(mean(scores.iter().map(|s| s.lexical))),
            semantic: semantic
                .is_some()
                .then(|| round3(mean(scores.iter().filter_map(|s| s.semantic)))),
            combined: round3(mean(scores.iter().map(|s| s.combined))),
        };

        Some(SimilarityReport {
            references: scores,
            average,
        })
    }

    fn reference_scores(
        &self,
        hypothesis: &[String],
        reference: &[String],
        semantic: Option<f64>,
    ) -> ReferenceScores {
        let bleu = bleu(hypothesis, reference);
        let rouge = rouge(hypothesis, reference);
        let lexical = (bleu + rouge) / 2.0;

        let combined = match semantic {
            Some(semantic) if self.lexical_weight + self.semantic_weight > 0.0 => {
                (self.lexical_weight * lexical + self.semantic_weight * semantic)
                    / (self.lexical_weight + self.semantic_weight)
            }
            _ => lexical,
        };

        ReferenceScores {
            bleu: round3(bleu),
            rouge: round3(rouge),
            lexical: round3(lexical),
            semantic: semantic.map(round3),
            combined: round3(combined),
        }
    }

    /// Cosine similarities clamped to [0, 1]; `None` if disabled or the provider fails
    async fn semantic_scores(&self, generated: &str, references: &[String]) -> Option<Vec<f64>> {
        let semantic = self.semantic.as_ref()?;

        let mut inputs = Vec::with_capacity(references.len() + 1);
        inputs.push(generated.to_string());
        inputs.extend(references.iter().cloned());

        let response = match semantic
            .provider
            .embed(EmbeddingRequest::batch(&semantic.model, inputs))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Semantic similarity unavailable");
                return None;
            }
        };

        let (first, rest) = response.embeddings().split_first()?;
        if rest.len() != references.len() {
            warn!(
                expected = references.len(),
                got = rest.len(),
                "Embedding count mismatch"
            );
            return None;
        }

        Some(
            rest.iter()
                .map(|e| (cosine_similarity(first.vector(), e.vector()) as f64).clamp(0.0, 1.0))
                .collect(),
        )
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::lexical_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_no_references_yields_none() {
        let scorer = SimilarityScorer::lexical_only();
        assert!(scorer.score("текст", &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_lexical_only_combined_equals_lexical() {
        let scorer = SimilarityScorer::lexical_only();
        let references = vec![
            "очень вкусный кофе и выпечка".to_string(),
            "ужасная парковка".to_string(),
        ];

        let report = scorer
            .score("Очень вкусный кофе и выпечка!", &references)
            .await
            .unwrap();

        assert_eq!(report.references.len(), 2);
        assert_eq!(report.references[0].bleu, 1.0);
        assert_eq!(report.references[0].rouge, 1.0);
        assert_eq!(report.references[1].lexical, 0.0);
        assert!(report.references.iter().all(|r| r.semantic.is_none()));
        assert!(report.references.iter().all(|r| r.combined == r.lexical));
        assert_eq!(report.average.lexical, 0.5);
        assert!(report.average.semantic.is_none());
    }

    #[tokio::test]
    async fn test_semantic_scores_are_weighted_and_clamped() {
        let provider = MockEmbeddingProvider::new()
            .with_vector("отзыв", vec![1.0, 0.0])
            .with_vector("похожий", vec![1.0, 0.0])
            .with_vector("противоположный", vec![-1.0, 0.0]);
        let scorer = SimilarityScorer::with_embeddings(Arc::new(provider), "emb", 0.5, 0.5);

        let report = scorer
            .score(
                "отзыв",
                &["похожий".to_string(), "противоположный".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(report.references[0].semantic, Some(1.0));
        assert_eq!(report.references[0].combined, 0.5);
        assert_eq!(report.references[1].semantic, Some(0.0));
        assert_eq!(report.average.semantic, Some(0.5));
    }

    #[tokio::test]
    async fn test_embedding_failure_falls_back_to_lexical() {
        let provider = MockEmbeddingProvider::new().with_error("quota exceeded");
        let scorer = SimilarityScorer::with_embeddings(Arc::new(provider), "emb", 0.3, 0.7);

        let report = scorer
            .score("вкусный кофе", &["вкусный кофе".to_string()])
            .await
            .unwrap();

        assert!(report.references[0].semantic.is_none());
        assert_eq!(report.references[0].combined, report.references[0].lexical);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.9996), 1.0);
    }
}
