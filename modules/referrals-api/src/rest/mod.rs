pub mod campaigns;
pub mod redirect;
pub mod signups;

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use referrals_core::ReferralError;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

// --- Helpers ---

/// Resolve paging query params. The first page starts at cursor 0.
pub fn page_params(cursor: Option<i64>, limit: Option<u32>) -> (i64, u32) {
    (
        cursor.unwrap_or(0).max(0),
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
    )
}

/// Parse a numeric path id.
pub fn parse_id(raw: &str, what: &str) -> Result<i64, Response> {
    raw.parse::<i64>()
        .map_err(|_| bad_request(format!("invalid {what}: {raw}")))
}

pub fn bad_request(message: impl Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

/// Map store errors onto HTTP status codes.
pub fn error_response(err: ReferralError) -> Response {
    let status = match &err {
        ReferralError::NotFound { .. } => StatusCode::NOT_FOUND,
        ReferralError::SelfReferral { .. } | ReferralError::CampaignMismatch { .. } => {
            StatusCode::BAD_REQUEST
        }
        e if e.is_unique_violation() => StatusCode::CONFLICT,
        _ => {
            warn!(error = %err, "Store operation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "internal server error" })),
            )
                .into_response();
        }
    };

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
