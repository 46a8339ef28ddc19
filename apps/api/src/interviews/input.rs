use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::interview::InterviewType;
use crate::validation::{check_len, check_url, clean, require, MAX_SHORT_TEXT};

/// Formats accepted for a timestamp without offset, tried in order.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Default, Deserialize)]
pub struct InterviewInput {
    pub start_datetime: Option<String>,
    pub interviewer_name: Option<String>,
    pub interview_type: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterviewFields {
    pub start_datetime: DateTime<Utc>,
    pub interviewer_name: Option<String>,
    pub interview_type: Option<InterviewType>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

impl InterviewInput {
    /// Validates the input; naive timestamps are read as wall-clock time in `tz`.
    pub fn validate(self, tz: Tz) -> Result<InterviewFields, AppError> {
        let raw_start = require("start_datetime", self.start_datetime)?;
        let start_datetime = parse_start_datetime(&raw_start, tz)?;

        let interviewer_name = clean(self.interviewer_name);
        check_len("interviewer_name", interviewer_name.as_deref(), MAX_SHORT_TEXT)?;

        let interview_type = clean(self.interview_type)
            .map(|t| t.parse::<InterviewType>().map_err(AppError::Validation))
            .transpose()?;

        let meeting_link = clean(self.meeting_link);
        check_url("meeting_link", meeting_link.as_deref())?;

        Ok(InterviewFields {
            start_datetime,
            interviewer_name,
            interview_type,
            meeting_link,
            notes: clean(self.notes),
        })
    }
}

/// Parses an RFC 3339 timestamp, or a local `datetime-local` value placed in `tz`.
/// Local times skipped by a DST change are rejected; repeated ones take the earlier instant.
pub fn parse_start_datetime(raw: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "start_datetime '{raw}' is not a valid date and time"
            ))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "start_datetime '{raw}' does not exist in timezone {}",
                tz.name()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_rfc3339_ignores_user_timezone() {
        let parsed = parse_start_datetime("2025-01-15T14:00:00+01:00", Tz::Asia__Tokyo).unwrap();
        assert_eq!(parsed, utc("2025-01-15T13:00:00Z"));
    }

    #[test]
    fn test_local_time_placed_in_user_timezone() {
        let parsed = parse_start_datetime("2025-01-15T14:00", Tz::Asia__Tokyo).unwrap();
        assert_eq!(parsed, utc("2025-01-15T05:00:00Z"));

        let parsed = parse_start_datetime("2025-01-15 09:30:00", Tz::America__New_York).unwrap();
        assert_eq!(parsed, utc("2025-01-15T14:30:00Z"));
    }

    #[test]
    fn test_dst_gap_rejected() {
        let err = parse_start_datetime("2025-03-09T02:30", Tz::America__New_York).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("does not exist")));
    }

    #[test]
    fn test_dst_overlap_takes_earlier_instant() {
        let parsed = parse_start_datetime("2025-11-02T01:30", Tz::America__New_York).unwrap();
        assert_eq!(parsed, utc("2025-11-02T05:30:00Z"));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_start_datetime("next tuesday", Tz::UTC).is_err());
    }

    #[test]
    fn test_validate_full_input() {
        let fields = InterviewInput {
            start_datetime: Some("2025-02-01T10:00".into()),
            interviewer_name: Some(" John Smith ".into()),
            interview_type: Some("technical".into()),
            meeting_link: Some("https://zoom.us/j/123456789".into()),
            notes: Some("".into()),
        }
        .validate(Tz::UTC)
        .unwrap();
        assert_eq!(fields.start_datetime, utc("2025-02-01T10:00:00Z"));
        assert_eq!(fields.interviewer_name.as_deref(), Some("John Smith"));
        assert_eq!(fields.interview_type, Some(InterviewType::Technical));
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn test_validate_requires_start() {
        let err = InterviewInput::default().validate(Tz::UTC).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "start_datetime is required"));
    }

    #[test]
    fn test_validate_rejects_unknown_type_and_bad_link() {
        let bad_type = InterviewInput {
            start_datetime: Some("2025-02-01T10:00".into()),
            interview_type: Some("coffee".into()),
            ..Default::default()
        };
        assert!(bad_type.validate(Tz::UTC).is_err());

        let bad_link = InterviewInput {
            start_datetime: Some("2025-02-01T10:00".into()),
            meeting_link: Some("zoom meeting".into()),
            ..Default::default()
        };
        assert!(bad_link.validate(Tz::UTC).is_err());
    }
}
