use sqlx::SqlitePool;

use crate::rows::CampaignRow;

/// Select a campaign by id.
pub(crate) async fn select_campaign(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<CampaignRow>> {
    sqlx::query_as::<_, CampaignRow>(
        r#"
        SELECT id, address, name, created_at, updated_at
        FROM campaigns
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Select a page of campaigns owned by an address, ascending by id.
pub(crate) async fn select_campaigns(
    pool: &SqlitePool,
    address: &str,
    cursor: i64,
    limit: u32,
) -> sqlx::Result<Vec<CampaignRow>> {
    sqlx::query_as::<_, CampaignRow>(
        r#"
        SELECT id, address, name, created_at, updated_at
        FROM campaigns
        WHERE address = ? AND id > ?
        ORDER BY id ASC
        LIMIT ?
        "#,
    )
    .bind(address)
    .bind(cursor)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

/// Insert a new named campaign for an address.
pub(crate) async fn insert_campaign(
    pool: &SqlitePool,
    address: &str,
    name: &str,
    now: i64,
) -> sqlx::Result<CampaignRow> {
    sqlx::query_as::<_, CampaignRow>(
        r#"
        INSERT INTO campaigns (address, name, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, address, name, created_at, updated_at
        "#,
    )
    .bind(address)
    .bind(name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}
