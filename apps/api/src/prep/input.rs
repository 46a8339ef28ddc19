use serde::Deserialize;

use crate::errors::AppError;
use crate::validation::{check_len, clean, MAX_AI_INPUT_CHARS};

/// The four free-text prep answers.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PrepInput {
    pub self_intro: Option<String>,
    pub why_apply: Option<String>,
    pub questions_to_ask: Option<String>,
    pub additional_notes: Option<String>,
}

impl PrepInput {
    /// Cleans blank answers to `None`. Answers are capped at the AI input
    /// limit since they may be sent for rating later.
    pub fn validate(self) -> Result<PrepInput, AppError> {
        let prep = PrepInput {
            self_intro: clean(self.self_intro),
            why_apply: clean(self.why_apply),
            questions_to_ask: clean(self.questions_to_ask),
            additional_notes: clean(self.additional_notes),
        };
        check_len("self_intro", prep.self_intro.as_deref(), MAX_AI_INPUT_CHARS)?;
        check_len("why_apply", prep.why_apply.as_deref(), MAX_AI_INPUT_CHARS)?;
        check_len("questions_to_ask", prep.questions_to_ask.as_deref(), MAX_AI_INPUT_CHARS)?;
        check_len("additional_notes", prep.additional_notes.as_deref(), MAX_AI_INPUT_CHARS)?;
        Ok(prep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answers_cleared() {
        let prep = PrepInput {
            self_intro: Some("  I build backends. ".into()),
            why_apply: Some("   ".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(prep.self_intro.as_deref(), Some("I build backends."));
        assert_eq!(prep.why_apply, None);
    }

    #[test]
    fn test_long_answer_rejected() {
        let err = PrepInput {
            additional_notes: Some("x".repeat(MAX_AI_INPUT_CHARS + 1)),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.starts_with("additional_notes")));
    }
}
