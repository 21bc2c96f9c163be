//! Connection handles. Reads and writes go through separate pools so a
//! read replica can sit behind `read` while `write` points at the primary.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{ReferralError, Result};

/// Where to connect. Built by the binary from its own configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub write_url: String,
    /// Falls back to `write_url` when unset.
    pub read_url: Option<String>,
    pub max_connections: u32,
}

impl DbConfig {
    /// The read URL, if it names a different database than the write URL.
    pub fn distinct_read_url(&self) -> Option<&str> {
        self.read_url.as_deref().filter(|url| *url != self.write_url)
    }
}

/// Read and write pools, passed explicitly to every store.
#[derive(Debug, Clone)]
pub struct DbHandles {
    pub read: SqlitePool,
    pub write: SqlitePool,
}

impl DbHandles {
    pub fn new(read: SqlitePool, write: SqlitePool) -> Self {
        Self { read, write }
    }

    /// Use one pool for both reads and writes.
    pub fn single(pool: SqlitePool) -> Self {
        Self {
            read: pool.clone(),
            write: pool,
        }
    }

    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let write = connect_pool(&config.write_url, config.max_connections, true).await?;

        let split = config.distinct_read_url();
        let read = match split {
            Some(url) => connect_pool(url, config.max_connections, false).await?,
            None => write.clone(),
        };

        info!(
            max_connections = config.max_connections,
            split = split.is_some(),
            "Connected to database"
        );

        Ok(Self { read, write })
    }

    /// A private in-memory database on a single pinned connection. Every
    /// connection to `sqlite::memory:` is a fresh database, so the pool must
    /// never open a second one or drop the first.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(ReferralError::Connect)?;

        Ok(Self::single(pool))
    }

    /// Run the embedded SQL migrations against the write handle.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.write).await?;
        Ok(())
    }
}

async fn connect_pool(url: &str, max_connections: u32, create: bool) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(ReferralError::Connect)?
        .create_if_missing(create)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(ReferralError::Connect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(read_url: Option<&str>) -> DbConfig {
        DbConfig {
            write_url: "sqlite://primary.db".into(),
            read_url: read_url.map(Into::into),
            max_connections: 4,
        }
    }

    #[test]
    fn read_url_splits_only_when_distinct() {
        assert_eq!(config(None).distinct_read_url(), None);
        assert_eq!(config(Some("sqlite://primary.db")).distinct_read_url(), None);
        assert_eq!(
            config(Some("sqlite://replica.db")).distinct_read_url(),
            Some("sqlite://replica.db")
        );
    }
}
