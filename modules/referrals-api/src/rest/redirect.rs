//! Cookie-based attribution. A visitor following a campaign link gets a
//! cookie naming the campaign; when they come back with an account address
//! after signing up, the cookie turns into a signup for that campaign.
//!
//! Both endpoints always redirect. Failures are logged and swallowed so a
//! visitor never lands on an error page.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Response, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{info, warn};

use referrals_core::{CampaignReader, SignupKeeper};

use crate::cookie::{campaign_cookie, parse_cookie, COOKIE_NAME};
use crate::validation;
use crate::AppState;

/// Header carrying the visitor's blockchain address after signup completes.
pub const ACCOUNT_ADDRESS_HEADER: &str = "x-account-address";

#[derive(Deserialize)]
pub struct ReferralsQuery {
    url: Option<String>,
}

/// GET /referrals/{id}/signup
///
/// Drops a campaign cookie when the campaign exists, then redirects to the
/// signup URL.
pub async fn signup_redirect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let redirect = &state.redirect;
    let Ok(campaign_id) = id.parse::<i64>() else {
        return found(&redirect.signup_url, None);
    };

    match state.campaigns.get_campaign(campaign_id).await {
        Ok(campaign) => {
            let cookie = campaign_cookie(campaign.id, &redirect.cookie_path, &redirect.cookie_domain);
            found(&redirect.signup_url, Some(cookie))
        }
        Err(e) => {
            warn!(campaign_id, error = %e, "Referral link for unknown campaign");
            found(&redirect.signup_url, None)
        }
    }
}

/// GET /referrals?url=
///
/// Records a signup from the campaign cookie, then redirects to `url`, or to
/// the signup URL when none is given.
pub async fn record_referral(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReferralsQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let location = params
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| state.redirect.signup_url.clone());

    let Some(raw_address) = headers
        .get(ACCOUNT_ADDRESS_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|a| !a.is_empty())
    else {
        info!(location = %location, "No address header; redirecting");
        return found(&location, None);
    };

    let address = match validation::address(raw_address) {
        Ok(address) => address,
        Err(e) => {
            warn!(error = %e, "Invalid address header; redirecting");
            return found(&location, None);
        }
    };

    let Some(cookie) = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| parse_cookie(h, COOKIE_NAME))
    else {
        info!(location = %location, "No referral cookie; redirecting");
        return found(&location, None);
    };

    let campaign_id = match cookie.parse::<i64>() {
        Ok(id) => id,
        Err(e) => {
            warn!(cookie, error = %e, "Failed to parse referral campaign cookie");
            return found(&location, None);
        }
    };

    let campaign = match state.campaigns.get_campaign(campaign_id).await {
        Ok(campaign) => campaign,
        Err(e) => {
            warn!(campaign_id, error = %e, "Failed to get referral campaign");
            return found(&location, None);
        }
    };

    if let Err(e) = state.signups.create_signup(campaign.id, &address).await {
        warn!(campaign_id, error = %e, "Failed to record signup referral");
    }

    found(&location, None)
}

/// 302 to `location`, optionally setting a cookie.
fn found(location: &str, cookie: Option<String>) -> axum::response::Response {
    let mut builder = Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location);
    if let Some(cookie) = cookie {
        builder = builder.header(header::SET_COOKIE, cookie);
    }

    builder.body(Body::empty()).unwrap_or_else(|e| {
        warn!(location, error = %e, "Invalid redirect target");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}
