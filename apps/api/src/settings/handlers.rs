use axum::{extract::State, Json};
use chrono_tz::{Tz, TZ_VARIANTS};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::{ApiJson, AppError};
use crate::models::profile::UserProfileRow;
use crate::settings::repo;
use crate::state::AppState;
use crate::timezone::resolve::{ResolvedTimezone, TimezoneSource};

const MAX_TIMEZONE_LEN: usize = 63;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub profile: UserProfileRow,
    pub current_timezone: &'static str,
    pub timezone_source: TimezoneSource,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub timezone: String,
    pub auto_detect_timezone: bool,
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    user: AuthUser,
    resolved: ResolvedTimezone,
) -> Result<Json<SettingsResponse>, AppError> {
    // Re-read after resolution: detection may have just updated the saved zone.
    let profile = repo::get_or_create_profile(&state.db, user.id()).await?;
    Ok(Json(SettingsResponse {
        profile,
        current_timezone: resolved.tz.name(),
        timezone_source: resolved.source,
    }))
}

/// PUT /api/v1/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    let tz = parse_timezone(&req.timezone)?;
    let profile =
        repo::update_profile(&state.db, user.id(), tz.name(), req.auto_detect_timezone).await?;
    tracing::info!("Updated settings for user {}", user.id());
    Ok(Json(profile))
}

/// GET /api/v1/settings/timezones
pub async fn handle_list_timezones(_user: AuthUser) -> Json<Vec<&'static str>> {
    Json(timezone_names())
}

/// Every IANA zone name known to the tz database build.
pub fn timezone_names() -> Vec<&'static str> {
    TZ_VARIANTS.iter().map(|tz| tz.name()).collect()
}

fn parse_timezone(raw: &str) -> Result<Tz, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("timezone is required".to_string()));
    }
    if name.chars().count() > MAX_TIMEZONE_LEN {
        return Err(AppError::Validation(format!(
            "timezone must be at most {MAX_TIMEZONE_LEN} characters"
        )));
    }
    name.parse::<Tz>()
        .map_err(|_| AppError::Validation(format!("Unknown timezone '{name}'")))
}
