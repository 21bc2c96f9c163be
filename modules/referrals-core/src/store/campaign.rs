use async_trait::async_trait;
use tracing::info;

use crate::db::DbHandles;
use crate::error::{ReferralError, Result};
use crate::keeper::{CampaignReader, CampaignWriter};
use crate::pagination::Page;
use crate::query;
use crate::rows::now_unix;
use crate::types::Campaign;

/// Manages referral campaigns in the database.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    db: DbHandles,
}

impl CampaignStore {
    pub fn new(db: DbHandles) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CampaignReader for CampaignStore {
    async fn get_campaign(&self, id: i64) -> Result<Campaign> {
        query::campaign::select_campaign(&self.db.read, id)
            .await
            .map_err(ReferralError::read("get_campaign"))?
            .map(Campaign::from)
            .ok_or(ReferralError::NotFound {
                op: "get_campaign",
                entity: "campaign",
                id,
            })
    }

    async fn list_campaigns(&self, address: &str, cursor: i64, limit: u32) -> Result<Page<Campaign>> {
        let rows = query::campaign::select_campaigns(&self.db.read, address, cursor, limit)
            .await
            .map_err(ReferralError::read("list_campaigns"))?;

        Ok(Page::from_rows(rows))
    }
}

#[async_trait]
impl CampaignWriter for CampaignStore {
    async fn create_campaign(&self, address: &str, name: &str) -> Result<Campaign> {
        let row = query::campaign::insert_campaign(&self.db.write, address, name, now_unix())
            .await
            .map_err(ReferralError::write("create_campaign"))?;

        info!(campaign_id = row.id, address, "Created referral campaign");
        Ok(row.into())
    }
}
