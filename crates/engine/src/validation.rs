//! Field validators.
//!
//! Validators never fail with an error: they return a [`ValidationResult`]
//! carrying the first violated rule for the field. [`validate_form`] folds
//! several field results into the first failure, so the caller surfaces one
//! message at a time.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;

use crate::{
    EngineError, ResultEngine,
    security::{contains_malicious_code, parse_date_time, parse_decimal, sanitize_input},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }

    /// Turns a failed result into [`EngineError::Validation`].
    pub fn into_result(self) -> ResultEngine<()> {
        if self.is_valid {
            return Ok(());
        }
        Err(EngineError::Validation(
            self.message
                .unwrap_or_else(|| "dados inválidos".to_string()),
        ))
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    /// Message used when `pattern` does not match.
    pub pattern_message: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NumberRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRules {
    pub required: bool,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
}

/// A date field as it arrives from the form: raw text or an already typed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateInput<'a> {
    Text(&'a str),
    Value(NaiveDateTime),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Self::Value(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        Self::Value(value.and_time(chrono::NaiveTime::MIN))
    }
}

pub fn validate_text_field(value: &str, field_name: &str, rules: &TextRules) -> ValidationResult {
    let sanitized = sanitize_input(value);
    if sanitized.is_empty() {
        if rules.required {
            return ValidationResult::invalid(format!("{field_name} é obrigatório"));
        }
        return ValidationResult::valid();
    }

    let len = sanitized.chars().count();
    if let Some(min) = rules.min_length
        && len < min
    {
        return ValidationResult::invalid(format!(
            "{field_name} deve ter pelo menos {min} caracteres"
        ));
    }
    if let Some(max) = rules.max_length
        && len > max
    {
        return ValidationResult::invalid(format!(
            "{field_name} deve ter no máximo {max} caracteres"
        ));
    }
    if let Some(pattern) = &rules.pattern
        && !pattern.is_match(&sanitized)
    {
        return ValidationResult::invalid(
            rules
                .pattern_message
                .clone()
                .unwrap_or_else(|| format!("{field_name} possui formato inválido")),
        );
    }
    if contains_malicious_code(&sanitized) {
        return ValidationResult::invalid(format!("{field_name} contém conteúdo não permitido"));
    }

    ValidationResult::valid()
}

pub fn validate_number_field(
    value: &str,
    field_name: &str,
    rules: &NumberRules,
) -> ValidationResult {
    if value.trim().is_empty() {
        if rules.required {
            return ValidationResult::invalid(format!("{field_name} é obrigatório"));
        }
        return ValidationResult::valid();
    }

    let Some(number) = parse_decimal(value) else {
        return ValidationResult::invalid(format!("{field_name} deve ser um número válido"));
    };
    if rules.integer && number.fract() != 0.0 {
        return ValidationResult::invalid(format!("{field_name} deve ser um número inteiro"));
    }
    if let Some(min) = rules.min
        && number < min
    {
        return ValidationResult::invalid(format!(
            "{field_name} deve ser maior ou igual a {min}"
        ));
    }
    if let Some(max) = rules.max
        && number > max
    {
        return ValidationResult::invalid(format!(
            "{field_name} deve ser menor ou igual a {max}"
        ));
    }

    ValidationResult::valid()
}

/// Validates a date field.
///
/// Bounds compare full date-time values, so a value later in the day than
/// `max_date` is rejected even when both fall on the same calendar day.
pub fn validate_date_field<'a>(
    value: impl Into<DateInput<'a>>,
    field_name: &str,
    rules: &DateRules,
) -> ValidationResult {
    let date = match value.into() {
        DateInput::Value(date) => date,
        DateInput::Text(text) if text.trim().is_empty() => {
            if rules.required {
                return ValidationResult::invalid(format!("{field_name} é obrigatória"));
            }
            return ValidationResult::valid();
        }
        DateInput::Text(text) => match parse_date_time(text) {
            Some(date) => date,
            None => {
                return ValidationResult::invalid(format!(
                    "{field_name} deve ser uma data válida"
                ));
            }
        },
    };

    if let Some(min) = rules.min_date
        && date < min
    {
        return ValidationResult::invalid(format!(
            "{field_name} não pode ser anterior a {}",
            min.format("%d/%m/%Y %H:%M")
        ));
    }
    if let Some(max) = rules.max_date
        && date > max
    {
        return ValidationResult::invalid(format!(
            "{field_name} não pode ser posterior a {}",
            max.format("%d/%m/%Y %H:%M")
        ));
    }

    ValidationResult::valid()
}

/// Returns the first invalid result, or a valid one when every field passed.
pub fn validate_form(results: &[ValidationResult]) -> ValidationResult {
    results
        .iter()
        .find(|r| !r.is_valid)
        .cloned()
        .unwrap_or_else(ValidationResult::valid)
}
