//! HTTP server command
//!
//! Initializes the schema, then serves the recruiters and auth API.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use recruitd_server::auth::{AuthService, TokenSigner};
use recruitd_server::http::{run_server, ServerConfig};
use recruitd_server::{AppState, PgBackend, Store};

use super::db::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_KEY", hide_env_values = true)]
    pub jwt_key: Option<String>,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let jwt_key = args
        .jwt_key
        .filter(|key| !key.is_empty())
        .context("JWT_KEY not set. Set via --jwt-key, JWT_KEY env, or .env")?;

    let store = Store::new(PgBackend::new(args.db.to_config()));

    // The recruiters table must exist before the first request lands
    store
        .init()
        .await
        .context("Failed to initialize database schema")?;

    let auth = AuthService::new(store.clone(), TokenSigner::new(&jwt_key));
    let state = AppState::new(store, auth);

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting recruitd on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
