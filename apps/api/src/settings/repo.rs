use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::UserProfileRow;

/// Returns the user's profile, creating it with defaults on first use.
pub async fn get_or_create_profile(pool: &PgPool, user_id: Uuid) -> sqlx::Result<UserProfileRow> {
    sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    timezone: &str,
    auto_detect_timezone: bool,
) -> sqlx::Result<UserProfileRow> {
    sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles (user_id, timezone, auto_detect_timezone)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET timezone = EXCLUDED.timezone,
            auto_detect_timezone = EXCLUDED.auto_detect_timezone,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(timezone)
    .bind(auto_detect_timezone)
    .fetch_one(pool)
    .await
}

/// Records a detected timezone without touching the auto-detect flag.
pub async fn set_profile_timezone(
    pool: &PgPool,
    user_id: Uuid,
    timezone: &str,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE user_profiles SET timezone = $2, updated_at = NOW() WHERE user_id = $1")
        .bind(user_id)
        .bind(timezone)
        .execute(pool)
        .await?;
    Ok(())
}
