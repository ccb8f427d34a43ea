//! Create the recruiters table without starting the server

use anyhow::{Context, Result};
use clap::Parser;
use recruitd_server::{PgBackend, Store};

use super::db::DbArgs;

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = args.db.to_config();
    tracing::info!(?config, "initializing schema");

    let store = Store::new(PgBackend::new(config));
    store
        .init()
        .await
        .context("Failed to initialize database schema")?;

    tracing::info!("schema ready");
    Ok(())
}
