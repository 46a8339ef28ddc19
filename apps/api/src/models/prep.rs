use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewPrepRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub self_intro: Option<String>,
    pub why_apply: Option<String>,
    pub questions_to_ask: Option<String>,
    pub additional_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
