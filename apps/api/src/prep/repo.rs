use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::prep::InterviewPrepRow;
use crate::prep::input::PrepInput;

// Prep rows are reached only through a company the caller already owns,
// so these queries key on company_id alone.

pub async fn find_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> sqlx::Result<Option<InterviewPrepRow>> {
    sqlx::query_as::<_, InterviewPrepRow>("SELECT * FROM interview_preps WHERE company_id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await
}

/// Returns the company's prep row, creating an empty one on first access.
pub async fn get_or_create(pool: &PgPool, company_id: Uuid) -> sqlx::Result<InterviewPrepRow> {
    sqlx::query(
        r#"
        INSERT INTO interview_preps (id, company_id)
        VALUES ($1, $2)
        ON CONFLICT (company_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, InterviewPrepRow>("SELECT * FROM interview_preps WHERE company_id = $1")
        .bind(company_id)
        .fetch_one(pool)
        .await
}

pub async fn upsert_prep(
    executor: impl PgExecutor<'_>,
    company_id: Uuid,
    prep: &PrepInput,
) -> sqlx::Result<InterviewPrepRow> {
    sqlx::query_as::<_, InterviewPrepRow>(
        r#"
        INSERT INTO interview_preps
            (id, company_id, self_intro, why_apply, questions_to_ask, additional_notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (company_id) DO UPDATE
        SET self_intro = EXCLUDED.self_intro,
            why_apply = EXCLUDED.why_apply,
            questions_to_ask = EXCLUDED.questions_to_ask,
            additional_notes = EXCLUDED.additional_notes,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(&prep.self_intro)
    .bind(&prep.why_apply)
    .bind(&prep.questions_to_ask)
    .bind(&prep.additional_notes)
    .fetch_one(executor)
    .await
}
