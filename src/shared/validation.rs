//! Validation Utilities

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::AppError;

/// Accepted branch phone numbers: optional leading `+`, then 10 to 13 digits.
pub static PHONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{10,13}$").expect("phone number pattern is valid")
});

/// Check a phone number against [`PHONE_NUMBER_REGEX`].
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER_REGEX.is_match(phone_number)
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages = Vec::new();
    collect_messages(None, &errors, &mut messages);
    messages.sort();

    let message = messages
        .into_iter()
        .next()
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

fn collect_messages(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(Some(&format!("{}[{}]", path, index)), inner, out);
                }
            }
        }
    }
}
