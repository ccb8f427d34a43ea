//! Statement execution backends
//!
//! A [`Backend`] runs exactly one built statement per call. [`PgBackend`]
//! opens a fresh PostgreSQL connection for every call and closes it again on
//! every exit path, so no connection state is shared between calls.

use std::future::Future;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgColumn, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, PgConnection, Postgres, Row, TypeInfo};
use uuid::Uuid;

use super::config::DbConfig;
use super::error::DbError;
use super::mapper::ResultSet;
use super::query::BuiltQuery;
use super::value::Value;

/// Executes one statement per call
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run a row-returning statement
    async fn fetch(&self, query: &BuiltQuery) -> Result<ResultSet, DbError>;

    /// Run a statement for its side effect, returning the affected row count
    async fn execute(&self, query: &BuiltQuery) -> Result<u64, DbError>;
}

/// Per-call PostgreSQL connections
#[derive(Debug, Clone)]
pub struct PgBackend {
    config: DbConfig,
}

impl PgBackend {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    async fn open(&self) -> Result<PgConnection, DbError> {
        PgConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(DbError::Connection)
    }

    /// Close failures are logged and never replace the statement's own result
    async fn close(conn: PgConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "failed to close database connection");
        }
    }

    /// Bound the whole open/execute/close cycle by the configured deadline.
    ///
    /// On expiry the in-flight future is dropped, which drops the connection
    /// and releases its socket.
    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, DbError>>,
    {
        match self.config.statement_timeout {
            Some(after) => tokio::time::timeout(after, fut)
                .await
                .map_err(|_| DbError::Timeout { after })?,
            None => fut.await,
        }
    }
}

#[async_trait]
impl Backend for PgBackend {
    async fn fetch(&self, query: &BuiltQuery) -> Result<ResultSet, DbError> {
        self.with_deadline(async {
            let mut conn = self.open().await?;
            let result = fetch_rows(&mut conn, query).await;
            Self::close(conn).await;
            result
        })
        .await
    }

    async fn execute(&self, query: &BuiltQuery) -> Result<u64, DbError> {
        self.with_deadline(async {
            let mut conn = self.open().await?;
            let result = bind_params(query)
                .execute(&mut conn)
                .await
                .map(|done| done.rows_affected())
                .map_err(DbError::from_execute);
            Self::close(conn).await;
            result
        })
        .await
    }
}

async fn fetch_rows(conn: &mut PgConnection, query: &BuiltQuery) -> Result<ResultSet, DbError> {
    let rows = bind_params(query)
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::from_execute)?;

    let columns = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
    Ok(ResultSet { columns, rows })
}

fn bind_params(query: &BuiltQuery) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %query.sql, params = query.params.len(), "executing statement");

    query
        .params
        .iter()
        .fold(sqlx::query(&query.sql), |q, value| match value {
            Value::Null => q.bind(None::<String>),
            Value::Text(s) => q.bind(s.as_str()),
            Value::Integer(n) => q.bind(*n),
            Value::Boolean(b) => q.bind(*b),
            Value::Uuid(u) => q.bind(*u),
        })
}

fn decode_row(row: &PgRow) -> Result<Vec<Value>, DbError> {
    row.columns()
        .iter()
        .map(|column| decode_cell(row, column))
        .collect()
}

fn decode_cell(row: &PgRow, column: &PgColumn) -> Result<Value, DbError> {
    let i = column.ordinal();
    let cell = match column.type_info().name() {
        "UUID" => row.try_get::<Option<Uuid>, _>(i).map(Value::from),
        "INT2" => row
            .try_get::<Option<i16>, _>(i)
            .map(|v| Value::from(v.map(i64::from))),
        "INT4" => row.try_get::<Option<i32>, _>(i).map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(i).map(Value::from),
        "BOOL" => row.try_get::<Option<bool>, _>(i).map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "UNKNOWN" => {
            row.try_get::<Option<String>, _>(i).map(Value::from)
        }
        other => {
            return Err(DbError::mapping(format!(
                "column '{}' has unsupported type {}",
                column.name(),
                other
            )))
        }
    };

    cell.map_err(|e| DbError::mapping(format!("column '{}': {}", column.name(), e)))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tokio::net::TcpListener;

    use super::*;
    use crate::db::query::{build_init, build_select, QueryOptions};
    use crate::db::value::ValueMap;

    /// Accepts connections and never writes a byte back
    async fn silent_server() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        port
    }

    fn backend_for(port: u16, timeout: Duration) -> PgBackend {
        PgBackend::new(DbConfig {
            host: "127.0.0.1".into(),
            port,
            statement_timeout: Some(timeout),
            ..DbConfig::default()
        })
    }

    #[tokio::test]
    async fn execute_past_deadline_times_out() {
        let port = silent_server().await;
        let backend = backend_for(port, Duration::from_millis(100));

        let started = Instant::now();
        let err = backend.execute(&build_init()).await.unwrap_err();

        assert!(
            matches!(err, DbError::Timeout { after } if after == Duration::from_millis(100)),
            "got {err:?}"
        );
        assert!(err.is_connection());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn fetch_past_deadline_times_out() {
        let port = silent_server().await;
        let backend = backend_for(port, Duration::from_millis(100));

        let query = build_select("recruiters", &ValueMap::new(), &QueryOptions::new());
        let err = backend.fetch(&query).await.unwrap_err();

        assert!(matches!(err, DbError::Timeout { .. }), "got {err:?}");
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn refused_connection_is_not_a_timeout() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let backend = backend_for(port, Duration::from_secs(5));

        let err = backend.execute(&build_init()).await.unwrap_err();

        assert!(matches!(err, DbError::Connection(_)), "got {err:?}");
    }
}
