//! Prompts for the three model calls of the review workflow

use std::collections::HashMap;

use super::template::{PromptTemplate, TemplateError};
use crate::domain::review::GenerationRequest;

/// Substituted for the examples block when the store returned nothing
pub const NO_EXAMPLES_PLACEHOLDER: &str = "Примеры отзывов недоступны.";

pub const VALIDATION_PROMPT: &str = r#"Ты модератор сервиса, который генерирует отзывы о местах и услугах.
Проверь тему отзыва, которую ввёл пользователь:

"${var:input_text}"

Тема считается корректной, если одновременно:
1. она написана на русском языке;
2. не содержит нецензурной лексики, оскорблений или контента 18+;
3. относится к отзыву о месте, организации или услуге;
4. является осмысленным текстом, а не случайным набором символов.

Ответь строго в формате JSON без пояснений:
{"is_valid": true, "error_type": null}
Если тема некорректна, укажи в error_type одну причину из списка:
"non_russian", "nsfw", "irrelevant", "gibberish"."#;

pub const GENERATION_PROMPT: &str = r#"Ты пишешь реалистичные отзывы пользователей Яндекс Карт.

Напиши отзыв о заведении из рубрики "${var:category}".
Оценка автора: ${var:rating} из 5.
Ключевая тема отзыва: ${var:theme}.

Ориентируйся на стиль, лексику и длину реальных отзывов из этой рубрики:
${var:example_reviews}

Требования:
- пиши на русском языке от первого лица;
- тон отзыва должен соответствовать оценке ${var:rating} из 5;
- раскрой ключевую тему и упомяни детали, характерные для рубрики;
- длина отзыва от ${var:min_length} до ${var:max_length} символов;
- не копируй примеры дословно.

Верни только текст отзыва без заголовков и комментариев."#;

pub const SELF_CHECK_PROMPT: &str = r#"Ты эксперт по качеству пользовательских отзывов.
Оцени сгенерированный отзыв:

"${var:generated_review}"

Параметры, с которыми он должен совпадать:
- рубрика: ${var:category}
- оценка: ${var:rating} из 5
- ключевая тема: ${var:theme}

Поставь целую оценку от 0 до 10 по каждому критерию:
- theme_relevance: насколько отзыв раскрывает ключевую тему;
- rating_match: насколько тон отзыва соответствует оценке;
- language_quality: грамотность и естественность русского языка;
- consistency: логичность и непротиворечивость текста;
- category_specificity: наличие деталей, характерных для рубрики.

Ответь строго в формате JSON без пояснений:
{
  "verdict": "accept",
  "scores": {
    "theme_relevance": 0,
    "rating_match": 0,
    "language_quality": 0,
    "consistency": 0,
    "category_specificity": 0
  }
}
verdict равен "accept", если отзыв можно показать пользователю, иначе "reject"."#;

/// Target length range rendered into the generation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 50, max: 500 }
    }
}

/// Parsed templates for validation, generation and self-check
#[derive(Debug, Clone)]
pub struct ReviewPrompts {
    validation: PromptTemplate,
    generation: PromptTemplate,
    self_check: PromptTemplate,
    length: LengthBounds,
}

impl ReviewPrompts {
    pub fn new(length: LengthBounds) -> Self {
        Self {
            validation: PromptTemplate::parse(VALIDATION_PROMPT),
            generation: PromptTemplate::parse(GENERATION_PROMPT),
            self_check: PromptTemplate::parse(SELF_CHECK_PROMPT),
            length,
        }
    }

    pub fn validation(&self, theme: &str) -> Result<String, TemplateError> {
        let values = HashMap::from([("input_text", theme.to_string())]);
        self.validation.render(&values)
    }

    pub fn generation(&self, request: &GenerationRequest) -> Result<String, TemplateError> {
        let values = HashMap::from([
            ("category", request.category().to_string()),
            ("rating", request.rating().to_string()),
            ("theme", request.theme().to_string()),
            ("example_reviews", format_examples(request.example_reviews())),
            ("min_length", self.length.min.to_string()),
            ("max_length", self.length.max.to_string()),
        ]);
        self.generation.render(&values)
    }

    pub fn self_check(
        &self,
        generated_review: &str,
        request: &GenerationRequest,
    ) -> Result<String, TemplateError> {
        let values = HashMap::from([
            ("generated_review", generated_review.to_string()),
            ("category", request.category().to_string()),
            ("rating", request.rating().to_string()),
            ("theme", request.theme().to_string()),
        ]);
        self.self_check.render(&values)
    }
}

impl Default for ReviewPrompts {
    fn default() -> Self {
        Self::new(LengthBounds::default())
    }
}

/// Numbered block of exemplar reviews, or the placeholder sentence
pub fn format_examples(examples: &[String]) -> String {
    if examples.is_empty() {
        return NO_EXAMPLES_PLACEHOLDER.to_string();
    }

    examples
        .iter()
        .enumerate()
        .map(|(i, text)| format!("Пример {}:\n{}", i + 1, text.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
