//! HTTP server command for the MotoMind API

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use motomind_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use motomind_server::{create_pool, run_server, DbConfig, ServerConfig, SslMode};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Interface to bind to
    #[arg(long, env = "MOTOMIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Deployment environment; production connects to the database over TLS
    #[arg(long, env = "MOTOMIND_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allowed CORS origin (repeatable); any origin when none given
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl ServeArgs {
    fn db_config(&self) -> DbConfig {
        DbConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ssl: SslMode::for_production(self.environment == Environment::Production),
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.db_config();
    tracing::info!(
        environment = ?args.environment,
        ssl = ?db_config.ssl,
        max_connections = db_config.max_connections,
        "Connecting to database"
    );

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        let mut argv = vec!["serve"];
        argv.extend_from_slice(args);
        ServeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["--database-url", "postgres://localhost/motomind"]);
        assert_eq!(args.port, 3000);
        assert_eq!(args.environment, Environment::Development);
        assert_eq!(args.db_config().ssl, SslMode::Disabled);
        assert!(args.server_config().cors_origins.is_empty());
    }

    #[test]
    fn production_requires_tls() {
        let args = parse(&[
            "--database-url",
            "postgres://db/motomind",
            "--environment",
            "production",
            "--port",
            "8080",
            "--cors-origin",
            "https://a.example,https://b.example",
        ]);
        assert_eq!(args.db_config().ssl, SslMode::Required);
        assert_eq!(args.server_config().bind_addr.port(), 8080);
        assert_eq!(args.server_config().cors_origins.len(), 2);
    }
}
