use sqlx::SqlitePool;

use crate::rows::SignupRow;
use crate::types::SignupStatus;

/// Select a signup by id.
pub(crate) async fn select_signup(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<SignupRow>> {
    sqlx::query_as::<_, SignupRow>(
        r#"
        SELECT id, campaign_id, address, status, created_at, updated_at
        FROM signups
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Select a page of signups for a campaign, ascending by id.
pub(crate) async fn select_signups(
    pool: &SqlitePool,
    campaign_id: i64,
    cursor: i64,
    limit: u32,
) -> sqlx::Result<Vec<SignupRow>> {
    sqlx::query_as::<_, SignupRow>(
        r#"
        SELECT id, campaign_id, address, status, created_at, updated_at
        FROM signups
        WHERE campaign_id = ? AND id > ?
        ORDER BY id ASC
        LIMIT ?
        "#,
    )
    .bind(campaign_id)
    .bind(cursor)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

/// Insert a pending signup. Fails on the unique index when the address
/// already signed up under any campaign.
pub(crate) async fn insert_signup(
    pool: &SqlitePool,
    campaign_id: i64,
    address: &str,
    now: i64,
) -> sqlx::Result<SignupRow> {
    sqlx::query_as::<_, SignupRow>(
        r#"
        INSERT INTO signups (campaign_id, address, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, campaign_id, address, status, created_at, updated_at
        "#,
    )
    .bind(campaign_id)
    .bind(address)
    .bind(SignupStatus::Pending)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Set the status of a signup. Only `status` and `updated_at` change.
/// Returns `None` when no row has the id.
pub(crate) async fn update_signup_status(
    pool: &SqlitePool,
    id: i64,
    status: SignupStatus,
    now: i64,
) -> sqlx::Result<Option<SignupRow>> {
    sqlx::query_as::<_, SignupRow>(
        r#"
        UPDATE signups
        SET status = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, campaign_id, address, status, created_at, updated_at
        "#,
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await
}
