//! Decoding of structured model replies
//!
//! Replies are often wrapped in markdown fences or miss commas between
//! fields spread over several lines. Both are repaired before decoding.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::GenerationError;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z]*").expect("code fence pattern is a valid regex"));

/// A scalar value, a line break, then the start of a key or an object
static MISSING_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(true|false|null|-?\d+|"(?:[^"\\]|\\.)*")([ \t]*\r?\n\s*)(["{])"#)
        .expect("missing comma pattern is a valid regex")
});

const MAX_REPAIR_PASSES: usize = 8;

/// Remove markdown code-fence markers, keeping their content
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").into_owned()
}

/// Insert commas between line-separated fields; valid JSON is returned untouched
pub fn repair_missing_commas(text: &str) -> String {
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return text.to_string();
    }

    let mut current = text.to_string();
    for _ in 0..MAX_REPAIR_PASSES {
        let next = MISSING_COMMA.replace_all(&current, "$1,$2$3").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    current
}

/// Fence-stripped, trimmed reply narrowed to its outermost JSON object
fn normalize(raw: &str) -> String {
    let stripped = strip_code_fences(raw);
    let trimmed = stripped.trim();

    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Decode the reply of workflow step `step` into `T`
pub fn parse_reply<T: DeserializeOwned>(raw: &str, step: &str) -> Result<T, GenerationError> {
    let normalized = normalize(raw);
    let repaired = repair_missing_commas(&normalized);

    if repaired != normalized {
        debug!(step = %step, "Repaired missing commas in model reply");
    }

    serde_json::from_str(&repaired)
        .map_err(|e| GenerationError::parse(step, raw, repaired.clone(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckResult, QualityDimension, ValidationResult, Verdict};

    #[test]
    fn test_repair_is_identity_on_valid_json() {
        let inputs = [
            r#"{"is_valid": true, "error_type": null}"#,
            "{\n  \"verdict\": \"accept\",\n  \"scores\": {\n    \"theme_relevance\": 8\n  }\n}",
            r#"{"text": "строка с \"кавычками\"\nи переводом"}"#,
        ];

        for input in inputs {
            assert_eq!(repair_missing_commas(input), input);
        }
    }

    #[test]
    fn test_repair_boolean_before_key() {
        let repaired = repair_missing_commas("{\"is_valid\": true\n\"error_type\": null}");
        assert_eq!(repaired, "{\"is_valid\": true,\n\"error_type\": null}");
    }

    #[test]
    fn test_parse_repaired_validation_reply() {
        let result: ValidationResult =
            parse_reply("{\"is_valid\": true\n\"error_type\": null}", "validate").unwrap();
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn test_parse_fenced_multiline_reply_with_missing_commas() {
        let raw = "```json\n{\n  \"verdict\": \"accept\"\n  \"scores\": {\n    \"theme_relevance\": 9\n    \"rating_match\": 8\n    \"language_quality\": 10\n    \"consistency\": 7\n    \"category_specificity\": 8\n  }\n}\n```";

        let result: CheckResult = parse_reply(raw, "check").unwrap();
        assert_eq!(result.verdict, Verdict::Accept);
        assert_eq!(result.scores.get(QualityDimension::LanguageQuality), 10);
        assert_eq!(result.scores.get(QualityDimension::CategorySpecificity), 8);
    }

    #[test]
    fn test_parse_reply_with_surrounding_prose() {
        let raw = "Вот результат проверки:\n{\"is_valid\": false, \"error_type\": \"gibberish\"}\nГотово.";
        let result: ValidationResult = parse_reply(raw, "validate").unwrap();
        assert!(!result.is_valid);
    }

    #[test]
    fn test_strip_code_fences_without_language() {
        assert_eq!(strip_code_fences("```\n{}\n```").trim(), "{}");
    }

    #[test]
    fn test_parse_error_carries_step_and_texts() {
        let raw = "```json\n{\"verdict\": \n```";
        let error = parse_reply::<CheckResult>(raw, "check").unwrap_err();

        match error {
            GenerationError::Parse {
                step, raw: original, repaired, ..
            } => {
                assert_eq!(step, "check");
                assert_eq!(original, raw);
                assert_eq!(repaired, "{\"verdict\":");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let result = parse_reply::<CheckResult>(r#"{"verdict": "accept"}"#, "check");
        assert!(matches!(result, Err(GenerationError::Parse { .. })));
    }
}
