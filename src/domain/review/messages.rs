//! User-facing messages, in the deployment locale

use super::judgment::ValidationErrorType;

pub const NON_RUSSIAN: &str = "Пожалуйста, используйте русский язык для ввода темы отзыва.";
pub const NSFW: &str = "Пожалуйста, избегайте неприемлемого контента.";
pub const IRRELEVANT: &str = "Тема должна быть связана с отзывом о месте или услуге.";
pub const GIBBERISH: &str = "Пожалуйста, введите осмысленный текст для темы отзыва.";
pub const API_ERROR: &str =
    "Произошла ошибка при генерации отзыва. Пожалуйста, попробуйте позже.";
pub const VALIDATION_FAILED: &str =
    "Проверка не пройдена. Пожалуйста, измените параметры отзыва.";
pub const DEGRADED_QUALITY: &str = "Качество отзыва может быть не оптимальным.";
pub const EMPTY_FIELDS: &str = "Пожалуйста, заполните все поля!";
pub const INVALID_RATING: &str = "Оценка должна быть от 1 до 5.";
pub const NO_DATA: &str = "Для выбранной рубрики нет отзывов. Выберите другую рубрику.";
pub const RATE_LIMITED: &str = "Слишком много запросов. Пожалуйста, попробуйте позже.";

/// Message for a rejected theme; unknown reasons fall back to the generic one
pub fn validation_message(error_type: Option<&ValidationErrorType>) -> &'static str {
    match error_type {
        Some(ValidationErrorType::NonRussian) => NON_RUSSIAN,
        Some(ValidationErrorType::Nsfw) => NSFW,
        Some(ValidationErrorType::Irrelevant) => IRRELEVANT,
        Some(ValidationErrorType::Gibberish) => GIBBERISH,
        Some(ValidationErrorType::Other(_)) | None => VALIDATION_FAILED,
    }
}

pub fn api_error_message(detail: impl std::fmt::Display) -> String {
    format!("{API_ERROR} ({detail})")
}
