use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use referrals_api::config::Config;
use referrals_api::{build_router, AppState};
use referrals_core::DbHandles;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting referrals");

    let config = Config::load();
    config.log_summary();

    // Storage is required; failing to connect or migrate ends the process.
    let db = DbHandles::connect(&config.db_config()).await?;
    db.migrate().await?;
    info!("Migrations complete");

    let state = Arc::new(AppState::new(db, config.redirect_config()));
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Referral service starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
