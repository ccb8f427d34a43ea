//! In-process backend for unit tests
//!
//! Replays queued responses in order and records every statement it was
//! given. Clones share the same queue and log.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::backend::Backend;
use super::error::DbError;
use super::mapper::ResultSet;
use super::query::BuiltQuery;

enum Response {
    Rows(ResultSet),
    Affected(u64),
    Error(DbError),
}

#[derive(Default)]
struct Inner {
    responses: VecDeque<Response>,
    statements: Vec<BuiltQuery>,
}

#[derive(Clone, Default)]
pub struct ScriptedBackend {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, set: ResultSet) -> Self {
        self.push(Response::Rows(set))
    }

    pub fn with_affected(self, n: u64) -> Self {
        self.push(Response::Affected(n))
    }

    pub fn with_error(self, err: DbError) -> Self {
        self.push(Response::Error(err))
    }

    /// Every statement received so far, oldest first
    pub fn statements(&self) -> Vec<BuiltQuery> {
        self.inner.lock().unwrap().statements.clone()
    }

    fn push(self, response: Response) -> Self {
        self.inner.lock().unwrap().responses.push_back(response);
        self
    }

    fn next(&self, query: &BuiltQuery) -> Option<Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.statements.push(query.clone());
        inner.responses.pop_front()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn fetch(&self, query: &BuiltQuery) -> Result<ResultSet, DbError> {
        match self.next(query) {
            Some(Response::Rows(set)) => Ok(set),
            Some(Response::Error(e)) => Err(e),
            Some(Response::Affected(_)) | None => Ok(ResultSet::default()),
        }
    }

    async fn execute(&self, query: &BuiltQuery) -> Result<u64, DbError> {
        match self.next(query) {
            Some(Response::Affected(n)) => Ok(n),
            Some(Response::Rows(set)) => Ok(set.rows.len() as u64),
            Some(Response::Error(e)) => Err(e),
            None => Ok(1),
        }
    }
}
