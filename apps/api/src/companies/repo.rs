use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::companies::input::CompanyFields;
use crate::db::contains_pattern;
use crate::models::company::{CompanyRow, CompanySummary, CompanyStatus};

/// Filters for the company list screen.
#[derive(Debug, Default, Clone)]
pub struct CompanyFilter {
    pub status: Option<CompanyStatus>,
    pub location: Option<String>,
}

pub async fn count_companies(
    pool: &PgPool,
    user_id: Uuid,
    filter: &CompanyFilter,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM companies
        WHERE user_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL OR location ILIKE $3)
        "#,
    )
    .bind(user_id)
    .bind(filter.status.map(|s| s.as_str()))
    .bind(filter.location.as_deref().map(contains_pattern))
    .fetch_one(pool)
    .await
}

pub async fn list_companies(
    pool: &PgPool,
    user_id: Uuid,
    filter: &CompanyFilter,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT * FROM companies
        WHERE user_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL OR location ILIKE $3)
        ORDER BY updated_at DESC, id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(user_id)
    .bind(filter.status.map(|s| s.as_str()))
    .bind(filter.location.as_deref().map(contains_pattern))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Companies whose name, position title or location contains `query` (all when `None`).
pub async fn search_companies(
    pool: &PgPool,
    user_id: Uuid,
    query: Option<&str>,
) -> sqlx::Result<Vec<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT * FROM companies
        WHERE user_id = $1
          AND ($2::text IS NULL
               OR name ILIKE $2
               OR position_title ILIKE $2
               OR location ILIKE $2)
        ORDER BY updated_at DESC, id
        "#,
    )
    .bind(user_id)
    .bind(query.map(contains_pattern))
    .fetch_all(pool)
    .await
}

pub async fn recent_company_names(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> sqlx::Result<Vec<CompanySummary>> {
    sqlx::query_as::<_, CompanySummary>(
        "SELECT id, name FROM companies WHERE user_id = $1 ORDER BY updated_at DESC, id LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_company(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
) -> sqlx::Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1 AND user_id = $2")
        .bind(company_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_company(
    executor: impl PgExecutor<'_>,
    user_id: Uuid,
    fields: &CompanyFields,
) -> sqlx::Result<CompanyRow> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies
            (id, user_id, name, website_url, location, status,
             salary_min, salary_max, position_title, job_description_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&fields.name)
    .bind(&fields.website_url)
    .bind(&fields.location)
    .bind(fields.status.as_str())
    .bind(fields.salary_min)
    .bind(fields.salary_max)
    .bind(&fields.position_title)
    .bind(&fields.job_description_url)
    .fetch_one(executor)
    .await
}

pub async fn update_company(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
    fields: &CompanyFields,
) -> sqlx::Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies
        SET name = $3, website_url = $4, location = $5, status = $6,
            salary_min = $7, salary_max = $8, position_title = $9,
            job_description_url = $10, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(user_id)
    .bind(&fields.name)
    .bind(&fields.website_url)
    .bind(&fields.location)
    .bind(fields.status.as_str())
    .bind(fields.salary_min)
    .bind(fields.salary_max)
    .bind(&fields.position_title)
    .bind(&fields.job_description_url)
    .fetch_optional(pool)
    .await
}

/// Deletes the company; events and prep go with it through `ON DELETE CASCADE`.
pub async fn delete_company(pool: &PgPool, user_id: Uuid, company_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1 AND user_id = $2")
        .bind(company_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_logo_key(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
    key: &str,
) -> sqlx::Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies SET logo_key = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(user_id)
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Records an uploaded job description; `text` replaces any previously extracted text.
pub async fn set_job_description_file(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
    key: &str,
    text: Option<&str>,
) -> sqlx::Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies
        SET job_description_file_key = $3, job_description_text = $4, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(user_id)
    .bind(key)
    .bind(text)
    .fetch_optional(pool)
    .await
}

/// Removes every company (and, by cascade, event and prep) the user owns.
pub async fn delete_all_for_user(
    executor: impl PgExecutor<'_>,
    user_id: Uuid,
) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM companies WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
