use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::errors::AppError;
use crate::interviews::prompts::{
    interview_extract_prompt, INTERVIEW_EXTRACT_SYSTEM, INTERVIEW_EXTRACT_TEMPERATURE,
};
use crate::llm_client::LlmClient;

/// Asks the model for the interview details in `email_text`.
/// The reply is returned as parsed; nothing is persisted.
pub async fn extract_interview_details(
    llm: &LlmClient,
    email_text: &str,
) -> Result<Value, AppError> {
    let prompt = interview_extract_prompt(email_text, Utc::now().year());
    let data: Value = llm
        .call_json(&prompt, INTERVIEW_EXTRACT_SYSTEM, INTERVIEW_EXTRACT_TEMPERATURE)
        .await?;
    tracing::debug!("Extracted interview details: {data}");
    Ok(data)
}
