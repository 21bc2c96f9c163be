//! Dyn-compatible store traits. The HTTP layer depends on these rather than
//! on the concrete sqlx-backed stores.

use async_trait::async_trait;

use crate::error::Result;
use crate::pagination::Page;
use crate::types::{Campaign, Signup, SignupStatus};

/// Reads referral campaigns.
#[async_trait]
pub trait CampaignReader: Send + Sync {
    async fn get_campaign(&self, id: i64) -> Result<Campaign>;

    /// Campaigns owned by `address` with `id > cursor`, ascending, at most `limit`.
    async fn list_campaigns(&self, address: &str, cursor: i64, limit: u32) -> Result<Page<Campaign>>;
}

/// Writes referral campaigns.
#[async_trait]
pub trait CampaignWriter: Send + Sync {
    async fn create_campaign(&self, address: &str, name: &str) -> Result<Campaign>;
}

/// Manages referral campaigns.
pub trait CampaignKeeper: CampaignReader + CampaignWriter {}

impl<T: CampaignReader + CampaignWriter> CampaignKeeper for T {}

/// Manages signups for referral campaigns.
#[async_trait]
pub trait SignupKeeper: Send + Sync {
    async fn get_signup(&self, id: i64) -> Result<Signup>;

    /// Signups for `campaign_id` with `id > cursor`, ascending, at most `limit`.
    async fn list_signups(&self, campaign_id: i64, cursor: i64, limit: u32) -> Result<Page<Signup>>;

    async fn create_signup(&self, campaign_id: i64, address: &str) -> Result<Signup>;

    async fn update_signup(
        &self,
        campaign_id: i64,
        signup_id: i64,
        status: SignupStatus,
    ) -> Result<Signup>;
}
