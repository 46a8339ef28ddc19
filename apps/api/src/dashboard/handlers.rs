use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::companies::repo as company_repo;
use crate::dashboard::grouping::{group_by_local_day, DayGroup, UpcomingInterview};
use crate::errors::{ApiQuery, AppError};
use crate::interviews::repo as interview_repo;
use crate::models::company::CompanyRow;
use crate::state::AppState;
use crate::timezone::resolve::{ResolvedTimezone, TimezoneSource};
use crate::validation::clean;

/// How far ahead the upcoming list looks.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimezoneInfo {
    pub name: &'static str,
    pub source: TimezoneSource,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub upcoming_interviews: Vec<UpcomingInterview>,
    pub interviews_by_day: Vec<DayGroup>,
    pub timezone: TimezoneInfo,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub query: String,
    pub companies: Vec<CompanyRow>,
    #[serde(flatten)]
    pub calendar: CalendarResponse,
}

async fn load_calendar(
    state: &AppState,
    user: &AuthUser,
    resolved: ResolvedTimezone,
) -> Result<CalendarResponse, AppError> {
    let now = Utc::now();
    let until = now + Duration::days(UPCOMING_WINDOW_DAYS);
    let rows = interview_repo::upcoming_interviews(&state.db, user.id(), now, until).await?;

    let interviews_by_day = group_by_local_day(&rows, resolved.tz);
    let upcoming_interviews = rows
        .into_iter()
        .map(|row| UpcomingInterview::new(row, resolved.tz))
        .collect();

    Ok(CalendarResponse {
        upcoming_interviews,
        interviews_by_day,
        timezone: TimezoneInfo {
            name: resolved.tz.name(),
            source: resolved.source,
        },
    })
}

/// GET /api/v1/dashboard?q=
pub async fn handle_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    resolved: ResolvedTimezone,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let q = clean(query.q);
    let companies = company_repo::search_companies(&state.db, user.id(), q.as_deref()).await?;
    let calendar = load_calendar(&state, &user, resolved).await?;

    Ok(Json(DashboardResponse {
        query: q.unwrap_or_default(),
        companies,
        calendar,
    }))
}

/// GET /api/v1/calendar
pub async fn handle_calendar(
    State(state): State<AppState>,
    user: AuthUser,
    resolved: ResolvedTimezone,
) -> Result<Json<CalendarResponse>, AppError> {
    Ok(Json(load_calendar(&state, &user, resolved).await?))
}
