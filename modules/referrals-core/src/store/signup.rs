use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::DbHandles;
use crate::error::{ReferralError, Result};
use crate::keeper::{CampaignReader, SignupKeeper};
use crate::pagination::Page;
use crate::query;
use crate::rows::now_unix;
use crate::store::CampaignStore;
use crate::types::{Signup, SignupStatus};

/// Manages signups for referral campaigns.
///
/// Checks run on the read handle and the final statement on the write handle,
/// with no transaction in between. Under replica lag a fresh campaign may be
/// briefly invisible here. Duplicate addresses racing past each other are
/// caught by the unique index on `signups.address`.
#[derive(Debug, Clone)]
pub struct SignupStore {
    db: DbHandles,
    campaigns: CampaignStore,
}

impl SignupStore {
    pub fn new(db: DbHandles) -> Self {
        let campaigns = CampaignStore::new(db.clone());
        Self { db, campaigns }
    }
}

#[async_trait]
impl SignupKeeper for SignupStore {
    async fn get_signup(&self, id: i64) -> Result<Signup> {
        query::signup::select_signup(&self.db.read, id)
            .await
            .map_err(ReferralError::read("get_signup"))?
            .map(Signup::from)
            .ok_or(ReferralError::NotFound {
                op: "get_signup",
                entity: "signup",
                id,
            })
    }

    async fn list_signups(&self, campaign_id: i64, cursor: i64, limit: u32) -> Result<Page<Signup>> {
        let rows = query::signup::select_signups(&self.db.read, campaign_id, cursor, limit)
            .await
            .map_err(ReferralError::read("list_signups"))?;

        Ok(Page::from_rows(rows))
    }

    async fn create_signup(&self, campaign_id: i64, address: &str) -> Result<Signup> {
        let campaign = self
            .campaigns
            .get_campaign(campaign_id)
            .await
            .map_err(|e| e.within("create_signup"))?;

        if campaign.address == address {
            warn!(campaign_id, address, "Rejected self referral");
            return Err(ReferralError::SelfReferral {
                campaign_id,
                address: address.to_string(),
            });
        }

        let row = query::signup::insert_signup(&self.db.write, campaign_id, address, now_unix())
            .await
            .map_err(ReferralError::write("create_signup"))?;

        info!(signup_id = row.id, campaign_id, address, "Recorded referral signup");
        Ok(row.into())
    }

    async fn update_signup(
        &self,
        campaign_id: i64,
        signup_id: i64,
        status: SignupStatus,
    ) -> Result<Signup> {
        let current = self
            .get_signup(signup_id)
            .await
            .map_err(|e| e.within("update_signup"))?;

        if current.campaign_id != campaign_id {
            return Err(ReferralError::CampaignMismatch {
                campaign_id,
                signup_id,
            });
        }

        let row = query::signup::update_signup_status(&self.db.write, signup_id, status, now_unix())
            .await
            .map_err(ReferralError::write("update_signup"))?
            .ok_or(ReferralError::NotFound {
                op: "update_signup",
                entity: "signup",
                id: signup_id,
            })?;

        info!(signup_id, campaign_id, %status, "Updated signup status");
        Ok(row.into())
    }
}
