//! Request and response shapes shared by the AI-assisted endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::validation::MAX_AI_INPUT_CHARS;

/// A missing or `null` `email_text` is treated like a blank one.
#[derive(Debug, Deserialize)]
pub struct ExtractEmailRequest {
    #[serde(default)]
    pub email_text: Option<String>,
}

impl ExtractEmailRequest {
    pub fn validated_text(&self) -> Result<&str, AppError> {
        validate_email_text(self.email_text.as_deref().unwrap_or_default())
    }
}

/// Successful AI response: the model's JSON, passed through untouched.
#[derive(Debug, Serialize)]
pub struct AiResponse {
    pub ok: bool,
    pub data: Value,
}

impl AiResponse {
    pub fn new(data: Value) -> Self {
        Self { ok: true, data }
    }
}

/// Trims pasted email text and enforces the size limit.
pub fn validate_email_text(raw: &str) -> Result<&str, AppError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Email text is required".to_string()));
    }
    if text.chars().count() > MAX_AI_INPUT_CHARS {
        return Err(AppError::Validation(format!(
            "Email text is too long (max {MAX_AI_INPUT_CHARS} characters)"
        )));
    }
    Ok(text)
}
