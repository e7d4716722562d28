//! BLEU and ROUGE over lowercase word tokens

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

const MAX_NGRAM: usize = 4;
const SMOOTHING_EPSILON: f64 = 0.1;

/// Lowercased Unicode words; punctuation is dropped
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }

    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

/// Clipped n-gram overlap and the hypothesis n-gram total
fn overlap(hypothesis: &[String], reference: &[String], n: usize) -> (usize, usize) {
    let hyp = ngram_counts(hypothesis, n);
    let reference = ngram_counts(reference, n);

    let matched = hyp
        .iter()
        .map(|(gram, count)| (*count).min(reference.get(gram).copied().unwrap_or(0)))
        .sum();

    (matched, hypothesis.len().saturating_sub(n - 1))
}

/// Sentence BLEU with uniform 4-gram weights, epsilon smoothing of zero
/// precisions and a brevity penalty. Zero when no unigram matches.
pub fn bleu(hypothesis: &[String], reference: &[String]) -> f64 {
    if hypothesis.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let mut log_sum = 0.0;
    for n in 1..=MAX_NGRAM {
        let (matched, total) = overlap(hypothesis, reference, n);

        if n == 1 && matched == 0 {
            return 0.0;
        }

        let denominator = total.max(1) as f64;
        let precision = if matched == 0 {
            SMOOTHING_EPSILON / denominator
        } else {
            matched as f64 / denominator
        };

        log_sum += precision.ln() / MAX_NGRAM as f64;
    }

    brevity_penalty(hypothesis.len(), reference.len()) * log_sum.exp()
}

fn brevity_penalty(hypothesis_len: usize, reference_len: usize) -> f64 {
    if hypothesis_len > reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / hypothesis_len as f64).exp()
    }
}

fn f_measure(matched: usize, hypothesis_total: usize, reference_total: usize) -> f64 {
    if matched == 0 || hypothesis_total == 0 || reference_total == 0 {
        return 0.0;
    }

    let precision = matched as f64 / hypothesis_total as f64;
    let recall = matched as f64 / reference_total as f64;
    2.0 * precision * recall / (precision + recall)
}

/// ROUGE-N F-measure
pub fn rouge_n(hypothesis: &[String], reference: &[String], n: usize) -> f64 {
    let (matched, hypothesis_total) = overlap(hypothesis, reference, n);
    let reference_total = reference.len().saturating_sub(n - 1);
    f_measure(matched, hypothesis_total, reference_total)
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// ROUGE-L F-measure over the longest common subsequence
pub fn rouge_l(hypothesis: &[String], reference: &[String]) -> f64 {
    f_measure(lcs_len(hypothesis, reference), hypothesis.len(), reference.len())
}

/// Mean of ROUGE-1, ROUGE-2 and ROUGE-L
pub fn rouge(hypothesis: &[String], reference: &[String]) -> f64 {
    (rouge_n(hypothesis, reference, 1) + rouge_n(hypothesis, reference, 2) + rouge_l(hypothesis, reference))
        / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_tokenize_cyrillic_strips_punctuation() {
        assert_eq!(
            tokenize("Отличное КАФЕ, вкусный кофе!"),
            vec!["отличное", "кафе", "вкусный", "кофе"]
        );
    }

    #[test]
    fn test_identical_texts_score_one() {
        let text = tokens("очень вкусный кофе и свежая выпечка");

        assert!((bleu(&text, &text) - 1.0).abs() < 1e-9);
        assert!((rouge(&text, &text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_shared_words_score_zero() {
        let a = tokens("вкусный кофе");
        let b = tokens("долгая парковка");

        assert_eq!(bleu(&a, &b), 0.0);
        assert_eq!(rouge(&a, &b), 0.0);
    }

    #[test]
    fn test_bleu_smoothing_keeps_partial_match_positive() {
        let hypothesis = tokens("кофе был вкусный");
        let reference = tokens("вкусный кофе здесь");

        let score = bleu(&hypothesis, &reference);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_bleu_brevity_penalty() {
        let reference = tokens("вкусный кофе и свежая выпечка каждый день");
        let short = tokens("вкусный кофе");
        let long = tokens("вкусный кофе и свежая выпечка каждый");

        assert!(bleu(&short, &reference) < bleu(&long, &reference));
    }

    #[test]
    fn test_rouge_components() {
        let hypothesis = tokens("персонал очень вежливый");
        let reference = tokens("очень вежливый персонал");

        assert!((rouge_n(&hypothesis, &reference, 1) - 1.0).abs() < 1e-9);
        assert!((rouge_n(&hypothesis, &reference, 2) - 0.5).abs() < 1e-9);
        assert!((rouge_l(&hypothesis, &reference) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(bleu(&[], &tokens("кофе")), 0.0);
        assert_eq!(rouge(&tokens("кофе"), &[]), 0.0);
    }
}
