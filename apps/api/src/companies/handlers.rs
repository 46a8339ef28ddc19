use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::{AiResponse, ExtractEmailRequest};
use crate::auth::AuthUser;
use crate::companies::extract::extract_company_details;
use crate::companies::input::CompanyInput;
use crate::companies::repo::{self, CompanyFilter};
use crate::errors::{ApiJson, ApiPath, ApiQuery, AppError};
use crate::interviews::repo as interview_repo;
use crate::models::company::{CompanyRow, CompanyStatus, CompanySummary};
use crate::models::interview::InterviewEventRow;
use crate::models::prep::InterviewPrepRow;
use crate::prep::repo as prep_repo;
use crate::state::AppState;
use crate::validation::clean;

pub const PER_PAGE: i64 = 20;
const SIDEBAR_LIMIT: i64 = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CompanyListQuery {
    pub status: Option<String>,
    pub location: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StatusChoice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub items: Vec<CompanyRow>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub statuses: Vec<StatusChoice>,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanyRow,
    pub latest_interview: Option<InterviewEventRow>,
    pub interviews: Vec<InterviewEventRow>,
    pub prep: Option<InterviewPrepRow>,
}

/// Page number and row offset for a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub total_pages: i64,
    pub offset: i64,
}

/// Resolves the requested 1-based page against the row count. Page 1 is
/// always valid, even when there are no rows.
pub fn page_window(
    total: i64,
    requested: Option<i64>,
    per_page: i64,
) -> Result<PageWindow, AppError> {
    let page = requested.unwrap_or(1);
    let total_pages = ((total + per_page - 1) / per_page).max(1);
    if page < 1 || page > total_pages {
        return Err(AppError::NotFound(format!("Invalid page ({page})")));
    }
    Ok(PageWindow {
        page,
        total_pages,
        offset: (page - 1) * per_page,
    })
}

fn parse_filter(query: CompanyListQuery) -> Result<(CompanyFilter, Option<i64>), AppError> {
    let status = clean(query.status)
        .map(|s| s.parse::<CompanyStatus>().map_err(AppError::Validation))
        .transpose()?;
    Ok((
        CompanyFilter {
            status,
            location: clean(query.location),
        },
        query.page,
    ))
}

pub(crate) async fn load_owned_company(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> Result<CompanyRow, AppError> {
    repo::get_company(&state.db, user.id(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<CompanyListQuery>,
) -> Result<Json<CompanyListResponse>, AppError> {
    let (filter, page) = parse_filter(query)?;

    let total = repo::count_companies(&state.db, user.id(), &filter).await?;
    let window = page_window(total, page, PER_PAGE)?;
    let items =
        repo::list_companies(&state.db, user.id(), &filter, PER_PAGE, window.offset).await?;

    Ok(Json(CompanyListResponse {
        items,
        page: window.page,
        per_page: PER_PAGE,
        total,
        total_pages: window.total_pages,
        statuses: CompanyStatus::ALL
            .iter()
            .map(|s| StatusChoice {
                value: s.as_str(),
                label: s.label(),
            })
            .collect(),
    }))
}

/// GET /api/v1/companies/sidebar
///
/// The most recently touched companies, for navigation.
pub async fn handle_company_sidebar(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CompanySummary>>, AppError> {
    let companies = repo::recent_company_names(&state.db, user.id(), SIDEBAR_LIMIT).await?;
    Ok(Json(companies))
}

/// POST /api/v1/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CompanyInput>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    let fields = input.validate()?;
    let company = repo::create_company(&state.db, user.id(), &fields).await?;
    tracing::info!("Company '{}' created ({})", company.name, company.id);
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<CompanyDetailResponse>, AppError> {
    let company = load_owned_company(&state, &user, id).await?;
    let interviews = interview_repo::list_for_company(&state.db, user.id(), id).await?;
    let prep = prep_repo::find_for_company(&state.db, id).await?;

    Ok(Json(CompanyDetailResponse {
        company,
        latest_interview: interviews.first().cloned(),
        interviews,
        prep,
    }))
}

/// PUT /api/v1/companies/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<CompanyInput>,
) -> Result<Json<CompanyRow>, AppError> {
    let fields = input.validate()?;
    let company = repo::update_company(&state.db, user.id(), id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    tracing::info!("Company '{}' updated ({})", company.name, company.id);
    Ok(Json(company))
}

/// DELETE /api/v1/companies/:id
pub async fn handle_delete_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !repo::delete_company(&state.db, user.id(), id).await? {
        return Err(AppError::NotFound(format!("Company {id} not found")));
    }
    tracing::info!("Company {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/companies/extract-email
///
/// Extracts posting details from a pasted email for the user to review.
/// Does not save anything.
pub async fn handle_extract_company_email(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<ExtractEmailRequest>,
) -> Result<Json<AiResponse>, AppError> {
    let email_text = req.validated_text()?;
    let data = extract_company_details(&state.llm, email_text).await?;
    Ok(Json(AiResponse::new(data)))
}
