//! recruitd-server: recruiters CRUD and user auth over PostgreSQL
//!
//! The interesting part is [`db`]: a small query builder plus five generic
//! verbs (find_all, find_one, create, update, destroy) that work against any
//! table, opening one short-lived connection per statement.

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::{DbConfig, DbError, PgBackend, Store};
pub use state::AppState;
