//! HTTP server command for the ticketdesk API

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use ticketdesk_server::db::{self, DatabaseConfig, DATABASE_AUTH_TOKEN_ENV, DATABASE_URL_ENV};
use ticketdesk_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL: libsql://, https://, sqlite: or memory:
    #[arg(long, env = DATABASE_URL_ENV)]
    pub database_url: Option<String>,

    /// Database auth token
    #[arg(long, env = DATABASE_AUTH_TOKEN_ENV, hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Restrict CORS to this origin (repeatable; default allows any origin)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allowed_origins: Vec<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
    let database = DatabaseConfig::new(database_url, args.auth_token);
    tracing::debug!(?database, "database configuration");

    tracing::info!("Starting ticketdesk server on {}", args.bind);

    let store = db::connect(&database)
        .await
        .context("Failed to open ticket store")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        allowed_origins: args.allowed_origins,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
