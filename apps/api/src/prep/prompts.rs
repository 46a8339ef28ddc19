// Prep rating prompt templates.

use crate::llm_client::prompts::quoted_block;
use crate::prep::rating::PrepAnswers;

pub const PREP_RATE_SYSTEM: &str = "You are an expert interview coach. Rate prep answers fairly \
and provide constructive feedback.";

pub const PREP_RATE_TEMPERATURE: f32 = 0.5;

pub fn prep_rate_prompt(job_description: &str, answers: &PrepAnswers) -> String {
    format!(
        r#"You are an interview coach. Rate the following interview prep answers based on the job description.

{}

If the job description above is a URL (starts with http), use what it reveals about the role.
If it says "No job description provided", rate based on general interview best practices.

First, provide a brief summary of the job description (2-3 sentences max).
Then rate each prep answer.

Prep Answers to Rate:
1. Self-Introduction: {}
2. Why I Applied: {}
3. Additional Notes: {}

Questions the candidate plans to ask (context only, do not rate):
{}

Rate each answer on a scale of 1-10 based on:
- Relevance to the job description/requirements
- Clarity and professionalism
- Specificity and detail
- Likelihood to impress interviewer

Return ONLY valid JSON with this exact format:
{{
    "job_summary": "Brief 2-3 sentence summary of the job description and key requirements",
    "self_intro": {{"score": X, "feedback": "message"}},
    "why_apply": {{"score": X, "feedback": "message"}},
    "additional_notes": {{"score": X, "feedback": "message"}}
}}

Rules:
- Score must be 1-10 integer
- Feedback must be 1-2 sentences max
- Be constructive and encouraging
- Return ONLY JSON, no extra text
"#,
        quoted_block("Job Description", job_description),
        answers.self_intro,
        answers.why_apply,
        answers.additional_notes,
        answers.questions_to_ask,
    )
}
