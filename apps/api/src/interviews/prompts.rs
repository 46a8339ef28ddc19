// Interview extraction prompt templates.

use crate::llm_client::prompts::{quoted_block, EXTRACTION_RULES};

pub const INTERVIEW_EXTRACT_SYSTEM: &str = "You are a helpful assistant that extracts interview \
details from emails. Always return valid JSON.";

pub const INTERVIEW_EXTRACT_TEMPERATURE: f32 = 0.3;

/// `current_year` anchors dates that the email gives without a year.
pub fn interview_extract_prompt(email_text: &str, current_year: i32) -> String {
    format!(
        r#"Extract interview details from the email below.
Current year is {current_year}.

Return ONLY valid JSON with these fields (use null for unknown values):

Fields:
- interview_link
- interviewer_name
- interview_type (one of: phone, technical, onsite, hr, other, online)
- start_datetime_iso (ISO 8601 format, e.g., "{current_year}-01-15T14:00:00")
- meeting_link
- notes

{EXTRACTION_RULES}
- For notes, generate a short summary of the email content.
  Include interview tips ONLY if they are explicitly mentioned in the email.
  Do not add new advice or assumptions.
- If the email specifies a month and day but does not mention a year,
  assume the current year ({current_year}) unless the date would be in the past.
  If it would be in the past, use the next calendar year.

{}
"#,
        quoted_block("Email", email_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_states_year_and_rollover_rule() {
        let prompt = interview_extract_prompt("Interview on March 3rd at 2pm", 2026);
        assert!(prompt.contains("Current year is 2026."));
        assert!(prompt.contains("assume the current year (2026)"));
        assert!(prompt.contains("use the next calendar year"));
        assert!(prompt.contains("\"\"\"\nInterview on March 3rd at 2pm\n\"\"\""));
    }

    #[test]
    fn test_prompt_lists_interview_types() {
        let prompt = interview_extract_prompt("hi", 2026);
        assert!(prompt.contains("phone, technical, onsite, hr, other, online"));
        assert!(prompt.contains("start_datetime_iso"));
    }
}
