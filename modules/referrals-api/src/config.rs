use clap::Parser;
use tracing::info;

use referrals_core::DbConfig;

/// Service configuration. Every flag falls back to an environment variable,
/// and a `.env` file is read first when present.
#[derive(Debug, Clone, Parser)]
#[command(name = "referrals", about = "Referral campaign service")]
pub struct Config {
    /// Primary (write) database
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://referrals.db")]
    pub database_url: String,

    /// Read replica; reads use the primary when unset
    #[arg(long, env = "DATABASE_READ_URL")]
    pub database_read_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,

    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Where visitors land after the referral redirect
    #[arg(long, env = "SIGNUP_URL")]
    pub signup_url: String,

    #[arg(long, env = "SIGNUP_COOKIE_PATH", default_value = "/")]
    pub signup_cookie_path: String,

    /// Empty means a host-only cookie
    #[arg(long, env = "SIGNUP_COOKIE_DOMAIN", default_value = "")]
    pub signup_cookie_domain: String,
}

/// Settings for the cookie-based attribution flow, injected into handlers.
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    pub signup_url: String,
    pub cookie_path: String,
    pub cookie_domain: String,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            write_url: self.database_url.clone(),
            read_url: self.database_read_url.clone(),
            max_connections: self.database_max_connections,
        }
    }

    pub fn redirect_config(&self) -> RedirectConfig {
        RedirectConfig {
            signup_url: self.signup_url.clone(),
            cookie_path: self.signup_cookie_path.clone(),
            cookie_domain: self.signup_cookie_domain.clone(),
        }
    }

    pub fn log_summary(&self) {
        info!("Config loaded:");
        info!("  API: {}:{}", self.host, self.port);
        info!(
            "  DATABASE_READ_URL: {}",
            if self.database_read_url.is_some() { "<set>" } else { "<not set>" }
        );
        info!("  DATABASE_MAX_CONNECTIONS: {}", self.database_max_connections);
        info!("  SIGNUP_URL: {}", self.signup_url);
        info!("  SIGNUP_COOKIE_PATH: {}", self.signup_cookie_path);
        info!("  SIGNUP_COOKIE_DOMAIN: {}", self.signup_cookie_domain);
    }
}
