use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Applied,
    #[default]
    Interview,
    Offer,
    Rejected,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 4] = [
        CompanyStatus::Applied,
        CompanyStatus::Interview,
        CompanyStatus::Offer,
        CompanyStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Applied => "applied",
            CompanyStatus::Interview => "interview",
            CompanyStatus::Offer => "offer",
            CompanyStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanyStatus::Applied => "Applied",
            CompanyStatus::Interview => "Interview",
            CompanyStatus::Offer => "Offer",
            CompanyStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompanyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub website_url: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub position_title: Option<String>,
    pub job_description_url: Option<String>,
    pub logo_key: Option<String>,
    pub job_description_file_key: Option<String>,
    #[serde(skip_serializing)]
    pub job_description_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal projection used by navigation lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
}
