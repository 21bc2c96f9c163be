use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use referrals_core::{CampaignReader, SignupKeeper};

use super::{bad_request, error_response, page_params, parse_id};
use crate::validation::{SignupRequest, UpdateSignupRequest};
use crate::AppState;

#[derive(Deserialize)]
pub struct SignupsQuery {
    cursor: Option<i64>,
    limit: Option<u32>,
}

/// Resolve the campaign id from the path and make sure the campaign exists.
async fn existing_campaign(state: &AppState, raw_id: &str) -> Result<i64, Response> {
    let id = parse_id(raw_id, "campaign id")?;
    state
        .campaigns
        .get_campaign(id)
        .await
        .map(|campaign| campaign.id)
        .map_err(error_response)
}

/// GET /campaigns/{id}/signups
pub async fn list_signups(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<SignupsQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let campaign_id = match existing_campaign(&state, &id).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    let (cursor, limit) = page_params(params.cursor, params.limit);
    match state.signups.list_signups(campaign_id, cursor, limit).await {
        Ok(page) => Json(serde_json::json!({
            "cursor": page.cursor,
            "signups": page.items,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /campaigns/{id}/signups
pub async fn create_signup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let address = match request.validate() {
        Ok(address) => address,
        Err(e) => return bad_request(e),
    };
    let campaign_id = match existing_campaign(&state, &id).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.signups.create_signup(campaign_id, &address).await {
        Ok(signup) => Json(serde_json::json!({ "signup": signup })).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /campaigns/{id}/signups/{sid}
pub async fn update_signup(
    State(state): State<Arc<AppState>>,
    Path((id, sid)): Path<(String, String)>,
    body: Result<Json<UpdateSignupRequest>, JsonRejection>,
) -> impl IntoResponse {
    let signup_id = match parse_id(&sid, "signup id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let status = match request.validate() {
        Ok(status) => status,
        Err(e) => return bad_request(e),
    };
    let campaign_id = match existing_campaign(&state, &id).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.signups.update_signup(campaign_id, signup_id, status).await {
        Ok(signup) => Json(serde_json::json!({ "signup": signup })).into_response(),
        Err(e) => error_response(e),
    }
}
