use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use referrals_core::{CampaignReader, CampaignWriter};

use super::{bad_request, error_response, page_params, parse_id};
use crate::validation::CampaignRequest;
use crate::AppState;

#[derive(Deserialize)]
pub struct CampaignsQuery {
    address: Option<String>,
    cursor: Option<i64>,
    limit: Option<u32>,
}

/// GET /campaigns?address=
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CampaignsQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let Some(address) = params
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    else {
        return bad_request("address query param is required");
    };

    let (cursor, limit) = page_params(params.cursor, params.limit);
    match state.campaigns.list_campaigns(address, cursor, limit).await {
        Ok(page) => Json(serde_json::json!({
            "cursor": page.cursor,
            "campaigns": page.items,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /campaigns/{id}
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id, "campaign id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.campaigns.get_campaign(id).await {
        Ok(campaign) => Json(serde_json::json!({ "campaign": campaign })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /campaigns
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CampaignRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let (address, name) = match request.validate() {
        Ok(fields) => fields,
        Err(e) => return bad_request(e),
    };

    match state.campaigns.create_campaign(&address, &name).await {
        Ok(campaign) => Json(serde_json::json!({ "campaign": campaign })).into_response(),
        Err(e) => error_response(e),
    }
}
