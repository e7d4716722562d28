//! Similarity metrics between generated reviews and their exemplars

mod lexical;
mod scorer;

pub use lexical::{bleu, rouge, rouge_l, rouge_n, tokenize};
pub use scorer::{ReferenceScores, SimilarityReport, SimilarityScorer};
