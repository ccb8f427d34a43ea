//! Connection parameters
//!
//! Built once at startup and handed to [`PgBackend`](super::PgBackend).
//! Nothing in the data-access layer reads the process environment.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default per-call deadline (connect + statement + close)
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub database: String,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    /// `None` disables the deadline
    pub statement_timeout: Option<Duration>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            database: "recruitd".to_string(),
            password: None,
            host: "localhost".to_string(),
            port: 5432,
            statement_timeout: Some(DEFAULT_STATEMENT_TIMEOUT),
        }
    }
}

impl DbConfig {
    /// sqlx connect options for a single short-lived connection
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

// Keep the password out of logs
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}
