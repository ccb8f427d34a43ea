//! Data-access verbs
//!
//! Every verb builds one statement, hands it to the backend, and maps the
//! rows if there are any. Errors from the backend are passed through as-is;
//! nothing is retried.
//!
//! Concurrent calls against the same table are not ordered relative to each
//! other (there are no transactions), so two updates, or an update racing a
//! delete, may interleave in any order.

use std::sync::Arc;

use super::backend::Backend;
use super::error::DbError;
use super::mapper::{map_rows, Record};
use super::query::{build_delete, build_init, build_insert, build_select, build_update, QueryOptions};
use super::value::ValueMap;

/// Generic table access over a [`Backend`]
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Ensure the recruiters table exists. Safe to call more than once.
    pub async fn init(&self) -> Result<(), DbError> {
        self.backend.execute(&build_init()).await?;
        tracing::info!("schema initialized");
        Ok(())
    }

    /// All rows of `table` matching `conditions`
    pub async fn find_all(
        &self,
        table: &str,
        conditions: &ValueMap,
        options: &QueryOptions,
    ) -> Result<Vec<Record>, DbError> {
        let query = build_select(table, conditions, options);
        let set = self.backend.fetch(&query).await?;
        let records = map_rows(set)?;
        tracing::debug!(table, rows = records.len(), "find_all");
        Ok(records)
    }

    /// First matching row, or `None` when nothing matches
    pub async fn find_one(
        &self,
        table: &str,
        conditions: &ValueMap,
        options: &QueryOptions,
    ) -> Result<Option<Record>, DbError> {
        let options = QueryOptions {
            limit: Some(1),
            ..options.clone()
        };
        let records = self.find_all(table, conditions, &options).await?;
        Ok(records.into_iter().next())
    }

    pub async fn create(&self, table: &str, data: &ValueMap) -> Result<(), DbError> {
        let query = build_insert(table, data)?;
        self.backend.execute(&query).await?;
        tracing::debug!(table, "created record");
        Ok(())
    }

    /// Update every matching row. Matching nothing is not an error.
    pub async fn update(
        &self,
        table: &str,
        conditions: &ValueMap,
        data: &ValueMap,
    ) -> Result<(), DbError> {
        let query = build_update(table, conditions, data)?;
        let affected = self.backend.execute(&query).await?;
        tracing::debug!(table, affected, "updated records");
        Ok(())
    }

    /// Delete every matching row. Matching nothing is not an error.
    pub async fn destroy(&self, table: &str, conditions: &ValueMap) -> Result<(), DbError> {
        let query = build_delete(table, conditions);
        let affected = self.backend.execute(&query).await?;
        tracing::debug!(table, affected, "deleted records");
        Ok(())
    }
}
