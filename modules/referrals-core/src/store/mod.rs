//! sqlx-backed stores. Each holds the read/write handles it was built with;
//! no state survives between calls.

mod campaign;
mod signup;

pub use campaign::CampaignStore;
pub use signup::SignupStore;
