use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user settings; one row per user, created on first use with the
/// schema default zone (America/New_York).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub user_id: Uuid,
    pub timezone: String,
    pub auto_detect_timezone: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
