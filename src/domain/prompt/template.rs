//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable_name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Rendering is a single pass over the template, so substituted values are
//! never re-scanned for placeholders.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("variable pattern is a valid regex")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract its variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures<'_>| {
            let name = &cap[1];
            match values.get(name) {
                Some(value) => value.clone(),
                None => cap.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_parse_required_and_default_variables() {
        let template = PromptTemplate::parse("Тема: ${var:theme}, язык: ${var:language:русский}");

        assert_eq!(template.variables().len(), 2);
        assert!(template.variables()[0].is_required());
        assert_eq!(template.variables()[1].default.as_deref(), Some("русский"));
    }

    #[test]
    fn test_parse_underscored_names_and_duplicates() {
        let template = PromptTemplate::parse("${var:example_reviews} и снова ${var:example_reviews}");

        assert_eq!(template.variables().len(), 1);
        assert_eq!(template.variables()[0].name, "example_reviews");
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let template = PromptTemplate::parse("${var:rating} из 5, повторяю: ${var:rating}");
        let result = template.render(&values(&[("rating", "4")])).unwrap();

        assert_eq!(result, "4 из 5, повторяю: 4");
    }

    #[test]
    fn test_render_uses_default_when_missing() {
        let template = PromptTemplate::parse("Язык: ${var:language:русский}");
        let result = template.render(&HashMap::new()).unwrap();

        assert_eq!(result, "Язык: русский");
    }

    #[test]
    fn test_render_missing_required_variable() {
        let template = PromptTemplate::parse("Тема: ${var:theme}");
        let result = template.render(&HashMap::new());

        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "theme".to_string()
            })
        );
    }

    #[test]
    fn test_render_does_not_rescan_substituted_values() {
        let template = PromptTemplate::parse("Тема: ${var:theme}. Рубрика: ${var:category}");
        let result = template
            .render(&values(&[("theme", "${var:category}"), ("category", "Кафе")]))
            .unwrap();

        assert_eq!(result, "Тема: ${var:category}. Рубрика: Кафе");
    }

    #[test]
    fn test_literal_braces_are_preserved() {
        let template = PromptTemplate::parse(r#"Ответь JSON: {"is_valid": true} для ${var:theme}"#);
        let result = template.render(&values(&[("theme", "кофе")])).unwrap();

        assert_eq!(result, r#"Ответь JSON: {"is_valid": true} для кофе"#);
    }
}
