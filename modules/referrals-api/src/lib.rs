//! HTTP/JSON API and redirect flow for referral campaigns.

pub mod config;
pub mod cookie;
pub mod rest;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use referrals_core::{CampaignKeeper, CampaignStore, DbHandles, SignupKeeper, SignupStore};

use config::RedirectConfig;

pub struct AppState {
    pub campaigns: Arc<dyn CampaignKeeper>,
    pub signups: Arc<dyn SignupKeeper>,
    pub redirect: RedirectConfig,
}

impl AppState {
    /// Wire the sqlx-backed stores onto the given handles.
    pub fn new(db: DbHandles, redirect: RedirectConfig) -> Self {
        Self {
            campaigns: Arc::new(CampaignStore::new(db.clone())),
            signups: Arc::new(SignupStore::new(db)),
            redirect,
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/campaigns",
            get(rest::campaigns::list_campaigns).post(rest::campaigns::create_campaign),
        )
        .route("/campaigns/{id}", get(rest::campaigns::get_campaign))
        .route(
            "/campaigns/{id}/signups",
            get(rest::signups::list_signups).post(rest::signups::create_signup),
        )
        .route(
            "/campaigns/{id}/signups/{sid}",
            patch(rest::signups::update_signup),
        );

    Router::new()
        .route("/health", get(health))
        // Signup redirects
        .route("/referrals", get(rest::redirect::record_referral))
        .route("/referrals/{id}/signup", get(rest::redirect::signup_redirect))
        .nest("/referrals/api/v1", api)
        .with_state(state)
        // Logging layer: method + path + status + latency
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
