use axum::{extract::State, Json};
use uuid::Uuid;

use crate::ai::AiResponse;
use crate::auth::AuthUser;
use crate::companies::handlers::load_owned_company;
use crate::errors::{ApiJson, ApiPath, AppError};
use crate::models::prep::InterviewPrepRow;
use crate::prep::input::PrepInput;
use crate::prep::rating::{rate_prep, resolve_answers, resolve_job_description, RatePrepRequest};
use crate::prep::repo;
use crate::state::AppState;

/// GET /api/v1/companies/:company_id/prep
pub async fn handle_get_prep(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
) -> Result<Json<InterviewPrepRow>, AppError> {
    let company = load_owned_company(&state, &user, company_id).await?;
    let prep = repo::get_or_create(&state.db, company.id).await?;
    Ok(Json(prep))
}

/// PUT /api/v1/companies/:company_id/prep
pub async fn handle_update_prep(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<PrepInput>,
) -> Result<Json<InterviewPrepRow>, AppError> {
    let company = load_owned_company(&state, &user, company_id).await?;
    let prep = input.validate()?;
    let saved = repo::upsert_prep(&state.db, company.id, &prep).await?;
    tracing::info!("Prep notes saved for '{}'", company.name);
    Ok(Json(saved))
}

/// POST /api/v1/prep/rate
///
/// Rates the answers given in the body; missing ones come from the
/// company's saved prep when `company_id` is set.
pub async fn handle_rate_prep(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<RatePrepRequest>,
) -> Result<Json<AiResponse>, AppError> {
    let (company_id, job_description, requested) = req.validate()?;

    let (company, stored) = match company_id {
        Some(id) => {
            let company = load_owned_company(&state, &user, id).await?;
            let stored = repo::find_for_company(&state.db, id).await?;
            (Some(company), stored)
        }
        None => (None, None),
    };

    let job_description = resolve_job_description(job_description, company.as_ref())?;
    let answers = resolve_answers(requested, stored.as_ref());

    let data = rate_prep(&state.llm, &job_description, &answers).await?;
    Ok(Json(AiResponse::new(data)))
}
