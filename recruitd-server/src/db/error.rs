//! Data-access error taxonomy
//!
//! "No rows" is never an error here: reads return an empty `Vec` or `None`.

use std::time::Duration;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Could not establish or keep the connection
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Statement was rejected or failed while executing
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    /// Result set could not be turned into records
    #[error("mapping error: {reason}")]
    Mapping { reason: String },

    /// The call did not finish before the configured deadline
    #[error("database call timed out after {after:?}")]
    Timeout { after: Duration },

    /// Insert or update was asked to write zero columns
    #[error("no columns to write into '{table}'")]
    EmptyData { table: String },
}

impl DbError {
    pub fn mapping(reason: impl Into<String>) -> Self {
        Self::Mapping {
            reason: reason.into(),
        }
    }

    /// Classify a failure raised while a statement was running.
    ///
    /// Transport-level failures still count as connection errors even though
    /// the connection was already open.
    pub fn from_execute(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            other => Self::Query(other),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failure_during_execute_is_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = DbError::from_execute(sqlx::Error::Io(io));
        assert!(matches!(err, DbError::Connection(_)));
        assert!(err.is_connection());
    }

    #[test]
    fn protocol_failure_is_query_error() {
        let err = DbError::from_execute(sqlx::Error::Protocol("bad statement".into()));
        assert!(matches!(err, DbError::Query(_)));
        assert!(err.to_string().contains("bad statement"));
    }
}
