//! Field-level checks shared by the company, interview and prep inputs.
//!
//! Blank strings are treated as absent everywhere, so a cleared form field
//! stores `NULL` rather than an empty string.

use url::Url;

use crate::errors::AppError;

/// Standard cap for short text columns.
pub const MAX_SHORT_TEXT: usize = 255;

/// Cap for text forwarded to the completion API.
pub const MAX_AI_INPUT_CHARS: usize = 10_000;

/// Trims the value and maps blank strings to `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn require(field: &str, value: Option<String>) -> Result<String, AppError> {
    clean(value).ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

pub fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// Accepts absolute http(s) URLs only.
pub fn check_url(field: &str, value: Option<&str>) -> Result<(), AppError> {
    let Some(raw) = value else {
        return Ok(());
    };
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(AppError::Validation(format!("{field} must be a valid URL"))),
    }
}
