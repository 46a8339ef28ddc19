// Shared prompt fragments.
// Each feature that calls the LLM keeps its own prompts.rs alongside it.

/// Appended to every extraction prompt.
pub const EXTRACTION_RULES: &str = "\
Rules:
- Do NOT guess missing values
- Use null for unknown fields
- Return ONLY JSON, no extra text";

/// Wraps user-pasted text in a delimited block so it cannot be mistaken for instructions.
pub fn quoted_block(label: &str, text: &str) -> String {
    format!("{label}:\n\"\"\"\n{text}\n\"\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_block() {
        assert_eq!(quoted_block("Email", "hi"), "Email:\n\"\"\"\nhi\n\"\"\"");
    }
}
