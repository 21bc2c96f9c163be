//! Request bodies and their validation. Stores trust what comes out of here.

use serde::Deserialize;

use referrals_core::SignupStatus;

pub const ADDRESS_PREFIX: &str = "tp";
pub const ADDRESS_MIN_LEN: usize = 41;
pub const ADDRESS_MAX_LEN: usize = 61;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("address cannot be blank")]
    BlankAddress,

    #[error("address must be between 41 and 61 characters")]
    AddressLength,

    #[error("address must be all lower case")]
    NotLowercase,

    #[error("address must have prefix: tp")]
    MissingPrefix,

    #[error("invalid status: empty string")]
    EmptyStatus,

    #[error("invalid status variant: {0}")]
    UnknownStatus(String),
}

/// Body of `POST /campaigns`.
#[derive(Debug, Deserialize)]
pub struct CampaignRequest {
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Body of `POST /campaigns/{id}/signups`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub address: String,
}

/// Body of `PATCH /campaigns/{id}/signups/{sid}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSignupRequest {
    pub status: String,
}

impl CampaignRequest {
    /// Returns the normalized `(address, name)`. The name may be empty.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        Ok((address(&self.address)?, self.name.trim().to_string()))
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<String, ValidationError> {
        address(&self.address)
    }
}

impl UpdateSignupRequest {
    pub fn validate(&self) -> Result<SignupStatus, ValidationError> {
        status(&self.status)
    }
}

/// Check a blockchain address and return it trimmed. The length bound
/// applies to the raw input; blankness, case and prefix to the trimmed one.
pub fn address(raw: &str) -> Result<String, ValidationError> {
    let address = raw.trim();
    if address.is_empty() {
        return Err(ValidationError::BlankAddress);
    }
    if !(ADDRESS_MIN_LEN..=ADDRESS_MAX_LEN).contains(&raw.chars().count()) {
        return Err(ValidationError::AddressLength);
    }
    if address.to_lowercase() != address {
        return Err(ValidationError::NotLowercase);
    }
    if !address.starts_with(ADDRESS_PREFIX) {
        return Err(ValidationError::MissingPrefix);
    }
    Ok(address.to_string())
}

/// Trim and lowercase a status, then match it against the known variants.
pub fn status(raw: &str) -> Result<SignupStatus, ValidationError> {
    let status = raw.trim().to_lowercase();
    if status.is_empty() {
        return Err(ValidationError::EmptyStatus);
    }
    status
        .parse()
        .map_err(|_| ValidationError::UnknownStatus(status))
}
