use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Technical,
    Onsite,
    Online,
    Hr,
    Other,
}

impl InterviewType {
    pub const ALL: [InterviewType; 6] = [
        InterviewType::Phone,
        InterviewType::Technical,
        InterviewType::Onsite,
        InterviewType::Online,
        InterviewType::Hr,
        InterviewType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Phone => "phone",
            InterviewType::Technical => "technical",
            InterviewType::Onsite => "onsite",
            InterviewType::Online => "online",
            InterviewType::Hr => "hr",
            InterviewType::Other => "other",
        }
    }
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterviewType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown interview type '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub interviewer_name: Option<String>,
    pub interview_type: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An interview joined with its company name, for dashboard and calendar views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UpcomingInterviewRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub start_datetime: DateTime<Utc>,
    pub interviewer_name: Option<String>,
    pub interview_type: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}
