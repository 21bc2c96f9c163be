// Persisted row shapes. Timestamps are stored as INTEGER epoch seconds.

use chrono::{DateTime, Utc};

use crate::pagination::Keyed;
use crate::types::{Campaign, Signup, SignupStatus};

/// A row from the `campaigns` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CampaignRow {
    pub id: i64,
    pub address: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A row from the `signups` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SignupRow {
    pub id: i64,
    pub campaign_id: i64,
    pub address: String,
    pub status: SignupStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Epoch seconds to a UTC timestamp. Out-of-range values collapse to the epoch.
pub(crate) fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

pub(crate) fn now_unix() -> i64 {
    Utc::now().timestamp()
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: row.id,
            address: row.address,
            name: row.name,
            created_at: from_unix(row.created_at),
            updated_at: from_unix(row.updated_at),
        }
    }
}

impl From<SignupRow> for Signup {
    fn from(row: SignupRow) -> Self {
        Self {
            id: row.id,
            campaign_id: row.campaign_id,
            address: row.address,
            status: row.status,
            created_at: from_unix(row.created_at),
            updated_at: from_unix(row.updated_at),
        }
    }
}

impl Keyed for CampaignRow {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for SignupRow {
    fn key(&self) -> i64 {
        self.id
    }
}
