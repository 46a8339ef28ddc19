use serde_json::Value;

use crate::companies::prompts::{
    company_extract_prompt, COMPANY_EXTRACT_SYSTEM, COMPANY_EXTRACT_TEMPERATURE,
};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Asks the model for company posting fields found in `email_text`.
/// The reply is returned as parsed; nothing is persisted.
pub async fn extract_company_details(llm: &LlmClient, email_text: &str) -> Result<Value, AppError> {
    let prompt = company_extract_prompt(email_text);
    let data: Value = llm
        .call_json(&prompt, COMPANY_EXTRACT_SYSTEM, COMPANY_EXTRACT_TEMPERATURE)
        .await?;
    tracing::debug!("Extracted company details: {data}");
    Ok(data)
}
