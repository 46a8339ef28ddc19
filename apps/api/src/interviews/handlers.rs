use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::ai::{AiResponse, ExtractEmailRequest};
use crate::auth::AuthUser;
use crate::companies::handlers::load_owned_company;
use crate::errors::{ApiJson, ApiPath, AppError};
use crate::interviews::extract::extract_interview_details;
use crate::interviews::input::InterviewInput;
use crate::interviews::repo;
use crate::models::interview::InterviewEventRow;
use crate::state::AppState;
use crate::timezone::resolve::ResolvedTimezone;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview {id} not found"))
}

/// POST /api/v1/companies/:company_id/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
    user: AuthUser,
    resolved: ResolvedTimezone,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<InterviewInput>,
) -> Result<(StatusCode, Json<InterviewEventRow>), AppError> {
    let company = load_owned_company(&state, &user, company_id).await?;
    let fields = input.validate(resolved.tz)?;

    let event = repo::create_interview(&state.db, user.id(), company.id, &fields).await?;
    tracing::info!(
        "Interview {} scheduled for '{}' at {}",
        event.id,
        company.name,
        event.start_datetime
    );
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<InterviewEventRow>, AppError> {
    let event = repo::get_interview(&state.db, user.id(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// PUT /api/v1/interviews/:id
pub async fn handle_update_interview(
    State(state): State<AppState>,
    user: AuthUser,
    resolved: ResolvedTimezone,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<InterviewInput>,
) -> Result<Json<InterviewEventRow>, AppError> {
    let fields = input.validate(resolved.tz)?;
    let event = repo::update_interview(&state.db, user.id(), id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!("Interview {id} updated");
    Ok(Json(event))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let company_id = repo::delete_interview(&state.db, user.id(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!("Interview {id} deleted from company {company_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/interviews/extract-email
pub async fn handle_extract_interview_email(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<ExtractEmailRequest>,
) -> Result<Json<AiResponse>, AppError> {
    let email_text = req.validated_text()?;
    let data = extract_interview_details(&state.llm, email_text).await?;
    Ok(Json(AiResponse::new(data)))
}
