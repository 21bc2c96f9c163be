//! Data-access core for referral campaigns and the signups they generate.
//!
//! Enforces the domain rules: one signup per address system-wide, no
//! self-referral, keyset pagination by id, and signup status transitions
//! scoped to the owning campaign.

pub mod db;
pub mod error;
pub mod keeper;
pub mod pagination;
mod query;
mod rows;
pub mod store;
pub mod types;

pub use db::{DbConfig, DbHandles};
pub use error::{ReferralError, Result};
pub use keeper::{CampaignKeeper, CampaignReader, CampaignWriter, SignupKeeper};
pub use pagination::Page;
pub use store::{CampaignStore, SignupStore};
pub use types::{Campaign, Signup, SignupStatus, UnknownStatus};
