/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, ReferralError>;

#[derive(Debug, thiserror::Error)]
pub enum ReferralError {
    #[error("{op}: {entity} {id} not found")]
    NotFound {
        op: &'static str,
        entity: &'static str,
        id: i64,
    },

    #[error("self referral error: {address} owns campaign {campaign_id}")]
    SelfReferral { campaign_id: i64, address: String },

    #[error("invalid campaign: signup {signup_id} does not belong to campaign {campaign_id}")]
    CampaignMismatch { campaign_id: i64, signup_id: i64 },

    #[error("{op}: write failed: {source}")]
    Write {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{op}: read failed: {source}")]
    Read {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl ReferralError {
    pub(crate) fn write(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Write { op, source }
    }

    pub(crate) fn read(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Read { op, source }
    }

    /// Re-label a lookup miss with the operation that triggered it.
    pub(crate) fn within(self, op: &'static str) -> Self {
        match self {
            Self::NotFound { entity, id, .. } => Self::NotFound { op, entity, id },
            other => other,
        }
    }

    /// True when a write was rejected by a unique index, e.g. an address
    /// that already has a signup.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Write { source, .. } => source
                .as_database_error()
                .is_some_and(|e| e.is_unique_violation()),
            _ => false,
        }
    }
}
