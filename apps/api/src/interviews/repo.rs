use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::interviews::input::InterviewFields;
use crate::models::interview::{InterviewEventRow, UpcomingInterviewRow};

/// A company's interviews, most recent first.
pub async fn list_for_company(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
) -> sqlx::Result<Vec<InterviewEventRow>> {
    sqlx::query_as::<_, InterviewEventRow>(
        r#"
        SELECT * FROM interview_events
        WHERE company_id = $1 AND user_id = $2
        ORDER BY start_datetime DESC
        "#,
    )
    .bind(company_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_interview(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> sqlx::Result<Option<InterviewEventRow>> {
    sqlx::query_as::<_, InterviewEventRow>(
        "SELECT * FROM interview_events WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_interview(
    executor: impl PgExecutor<'_>,
    user_id: Uuid,
    company_id: Uuid,
    fields: &InterviewFields,
) -> sqlx::Result<InterviewEventRow> {
    sqlx::query_as::<_, InterviewEventRow>(
        r#"
        INSERT INTO interview_events
            (id, user_id, company_id, start_datetime, interviewer_name,
             interview_type, meeting_link, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(company_id)
    .bind(fields.start_datetime)
    .bind(&fields.interviewer_name)
    .bind(fields.interview_type.map(|t| t.as_str()))
    .bind(&fields.meeting_link)
    .bind(&fields.notes)
    .fetch_one(executor)
    .await
}

pub async fn update_interview(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    fields: &InterviewFields,
) -> sqlx::Result<Option<InterviewEventRow>> {
    sqlx::query_as::<_, InterviewEventRow>(
        r#"
        UPDATE interview_events
        SET start_datetime = $3, interviewer_name = $4, interview_type = $5,
            meeting_link = $6, notes = $7, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(fields.start_datetime)
    .bind(&fields.interviewer_name)
    .bind(fields.interview_type.map(|t| t.as_str()))
    .bind(&fields.meeting_link)
    .bind(&fields.notes)
    .fetch_optional(pool)
    .await
}

/// Deletes the event, returning the company it belonged to.
pub async fn delete_interview(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> sqlx::Result<Option<Uuid>> {
    sqlx::query_scalar(
        "DELETE FROM interview_events WHERE id = $1 AND user_id = $2 RETURNING company_id",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Events starting within `[from, to]`, earliest first, with their company name.
pub async fn upcoming_interviews(
    pool: &PgPool,
    user_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> sqlx::Result<Vec<UpcomingInterviewRow>> {
    sqlx::query_as::<_, UpcomingInterviewRow>(
        r#"
        SELECT e.id, e.company_id, c.name AS company_name, e.start_datetime,
               e.interviewer_name, e.interview_type, e.meeting_link, e.notes
        FROM interview_events e
        JOIN companies c ON c.id = e.company_id
        WHERE e.user_id = $1
          AND e.start_datetime >= $2
          AND e.start_datetime <= $3
        ORDER BY e.start_datetime ASC, e.id
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}
