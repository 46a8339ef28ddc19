//! AI rating of prep answers against the role's job description.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::company::CompanyRow;
use crate::models::prep::InterviewPrepRow;
use crate::prep::input::PrepInput;
use crate::prep::prompts::{prep_rate_prompt, PREP_RATE_SYSTEM, PREP_RATE_TEMPERATURE};
use crate::validation::{check_len, clean, MAX_AI_INPUT_CHARS};

pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Default, Deserialize)]
pub struct RatePrepRequest {
    pub company_id: Option<Uuid>,
    pub job_description: Option<String>,
    #[serde(flatten)]
    pub answers: PrepInput,
}

impl RatePrepRequest {
    /// Cleans every text field and enforces the AI input limit.
    pub fn validate(self) -> Result<(Option<Uuid>, Option<String>, PrepInput), AppError> {
        let job_description = clean(self.job_description);
        check_len("job_description", job_description.as_deref(), MAX_AI_INPUT_CHARS)?;
        let answers = self.answers.validate()?;
        Ok((self.company_id, job_description, answers))
    }
}

/// Answers as they are sent to the model; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepAnswers {
    pub self_intro: String,
    pub why_apply: String,
    pub questions_to_ask: String,
    pub additional_notes: String,
}

/// Fills each answer from the request, then the saved prep, then "Not provided".
pub fn resolve_answers(requested: PrepInput, stored: Option<&InterviewPrepRow>) -> PrepAnswers {
    let pick = |given: Option<String>, saved: Option<&Option<String>>| {
        given
            .or_else(|| saved.and_then(|s| clean(s.clone())))
            .unwrap_or_else(|| NOT_PROVIDED.to_string())
    };
    PrepAnswers {
        self_intro: pick(requested.self_intro, stored.map(|p| &p.self_intro)),
        why_apply: pick(requested.why_apply, stored.map(|p| &p.why_apply)),
        questions_to_ask: pick(requested.questions_to_ask, stored.map(|p| &p.questions_to_ask)),
        additional_notes: pick(requested.additional_notes, stored.map(|p| &p.additional_notes)),
    }
}

/// Picks the job description: the request's text, then the company's
/// extracted PDF text, then its posting URL.
pub fn resolve_job_description(
    requested: Option<String>,
    company: Option<&CompanyRow>,
) -> Result<String, AppError> {
    requested
        .or_else(|| company.and_then(|c| clean(c.job_description_text.clone())))
        .or_else(|| company.and_then(|c| clean(c.job_description_url.clone())))
        .map(|jd| truncate_chars(jd, MAX_AI_INPUT_CHARS))
        .ok_or_else(|| AppError::Validation("Job Description is missing".to_string()))
}

// Extracted PDF text is not length-checked on upload.
fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}

pub async fn rate_prep(
    llm: &LlmClient,
    job_description: &str,
    answers: &PrepAnswers,
) -> Result<Value, AppError> {
    let prompt = prep_rate_prompt(job_description, answers);
    let ratings: Value = llm
        .call_json(&prompt, PREP_RATE_SYSTEM, PREP_RATE_TEMPERATURE)
        .await?;
    tracing::debug!("Prep ratings: {ratings}");
    Ok(ratings)
}
