//! Connection arguments shared by every command that talks to Postgres

use std::time::Duration;

use clap::Args;
use recruitd_server::DbConfig;

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database name
    #[arg(long = "database", env = "DATABASE", default_value = "recruitd")]
    pub database: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Per-statement deadline in seconds (0 disables it)
    #[arg(long, env = "DB_STATEMENT_TIMEOUT", default_value_t = 30)]
    pub statement_timeout: u64,
}

impl DbArgs {
    pub fn to_config(&self) -> DbConfig {
        DbConfig {
            user: self.db_user.clone(),
            database: self.database.clone(),
            password: self.db_password.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            statement_timeout: (self.statement_timeout > 0)
                .then(|| Duration::from_secs(self.statement_timeout)),
        }
    }
}
