//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Production deployments
//! connect over TLS without certificate verification (hosted Postgres);
//! development connects in plain text.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// TLS negotiation for the store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disabled,
    Required,
}

impl SslMode {
    /// TLS is required in production and disabled otherwise.
    pub fn for_production(production: bool) -> Self {
        if production {
            Self::Required
        } else {
            Self::Disabled
        }
    }

    fn to_pg(self) -> PgSslMode {
        match self {
            Self::Disabled => PgSslMode::Disable,
            Self::Required => PgSslMode::Require,
        }
    }
}

/// Store connection settings
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub ssl: SslMode,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            ssl: SslMode::Disabled,
        }
    }

    fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(PgConnectOptions::from_str(&self.database_url)?.ssl_mode(self.ssl.to_pg()))
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new().max_connections(self.max_connections)
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::new("postgres://localhost/motomind")).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    config
        .pool_options()
        .connect_with(config.connect_options()?)
        .await
}

/// Create a pool that connects on first use.
///
/// Handy for routes that may never reach the store, and for tests.
pub fn create_lazy_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    Ok(config.pool_options().connect_lazy_with(config.connect_options()?))
}
