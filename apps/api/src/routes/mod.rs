pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::companies::{handlers as companies, uploads};
use crate::dashboard::handlers as dashboard;
use crate::interviews::handlers as interviews;
use crate::prep::handlers as prep;
use crate::settings::handlers as settings;
use crate::state::AppState;
use crate::storage::MAX_UPLOAD_BYTES;

/// Multipart framing on top of the file itself.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Companies
        .route(
            "/api/v1/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route(
            "/api/v1/companies/sidebar",
            get(companies::handle_company_sidebar),
        )
        .route(
            "/api/v1/companies/extract-email",
            post(companies::handle_extract_company_email),
        )
        .route(
            "/api/v1/companies/:id",
            get(companies::handle_get_company)
                .put(companies::handle_update_company)
                .delete(companies::handle_delete_company),
        )
        .route(
            "/api/v1/companies/:id/logo",
            put(uploads::handle_upload_logo).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/companies/:id/job-description-file",
            put(uploads::handle_upload_job_description)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/companies/:id/interviews",
            post(interviews::handle_create_interview),
        )
        .route(
            "/api/v1/companies/:id/prep",
            get(prep::handle_get_prep).put(prep::handle_update_prep),
        )
        // Interviews
        .route(
            "/api/v1/interviews/extract-email",
            post(interviews::handle_extract_interview_email),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview)
                .put(interviews::handle_update_interview)
                .delete(interviews::handle_delete_interview),
        )
        // Prep
        .route("/api/v1/prep/rate", post(prep::handle_rate_prep))
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/calendar", get(dashboard::handle_calendar))
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_update_settings),
        )
        .route(
            "/api/v1/settings/timezones",
            get(settings::handle_list_timezones),
        )
        .with_state(state)
}
