//! Logo and job description file uploads for a company.

use axum::{
    extract::{Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::companies::handlers::load_owned_company;
use crate::companies::repo;
use crate::errors::{ApiPath, AppError};
use crate::models::company::CompanyRow;
use crate::state::AppState;
use crate::storage::{extract_pdf_text, object_key, put_object, read_file_field};

/// PUT /api/v1/companies/:id/logo
pub async fn handle_upload_logo(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<CompanyRow>, AppError> {
    load_owned_company(&state, &user, id).await?;

    let file = read_file_field(multipart).await?;
    if !file.is_image() {
        return Err(AppError::Validation(
            "Logo must be an image file".to_string(),
        ));
    }

    let key = object_key("logos", user.id(), id, &file.file_name);
    put_object(&state.s3, &state.config.s3_bucket, &key, &file).await?;

    let company = repo::set_logo_key(&state.db, user.id(), id, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    Ok(Json(company))
}

/// PUT /api/v1/companies/:id/job-description-file
///
/// PDFs have their text extracted so prep rating can use it as the job description.
pub async fn handle_upload_job_description(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<Json<CompanyRow>, AppError> {
    load_owned_company(&state, &user, id).await?;

    let file = read_file_field(multipart).await?;
    let key = object_key("job_descriptions", user.id(), id, &file.file_name);
    put_object(&state.s3, &state.config.s3_bucket, &key, &file).await?;

    let text = if file.is_pdf() {
        extract_pdf_text(file.data.clone()).await
    } else {
        None
    };
    tracing::info!(
        "Job description uploaded for company {id} (text extracted: {})",
        text.is_some()
    );

    let company =
        repo::set_job_description_file(&state.db, user.id(), id, &key, text.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    Ok(Json(company))
}
