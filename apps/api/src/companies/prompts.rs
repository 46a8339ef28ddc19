// Company extraction prompt templates.

use crate::llm_client::prompts::{quoted_block, EXTRACTION_RULES};

pub const COMPANY_EXTRACT_SYSTEM: &str = "You are a helpful assistant that extracts company job \
posting details from emails. Always return valid JSON.";

pub const COMPANY_EXTRACT_TEMPERATURE: f32 = 0.3;

pub fn company_extract_prompt(email_text: &str) -> String {
    format!(
        r#"Extract company job posting details from the email below.

Return ONLY valid JSON with these fields (use null for unknown values):

Fields:
- company_name
- position_title
- location
- website_url
- salary_min (numeric only, no currency symbol)
- salary_max (numeric only, no currency symbol)
- job_description_url

{EXTRACTION_RULES}
- For salary, extract only numeric value (e.g., 100000 not "$100,000")
- If salary range given, use min and max separately

{}
"#,
        quoted_block("Email", email_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_email_and_fields() {
        let prompt = company_extract_prompt("We are hiring a Rust engineer at Acme.");
        assert!(prompt.contains("\"\"\"\nWe are hiring a Rust engineer at Acme.\n\"\"\""));
        for field in [
            "company_name",
            "position_title",
            "salary_min",
            "salary_max",
            "job_description_url",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("Do NOT guess missing values"));
    }
}
