//! Database layer - query builders, record mapping, and the data-access verbs
//!
//! # Design Principles
//!
//! - One statement per call, one connection per statement
//! - Values are always bound, never interpolated
//! - Absence is `None` / an empty `Vec`, not an error

pub mod backend;
pub mod config;
pub mod error;
pub mod mapper;
pub mod query;
pub mod store;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, PgBackend};
pub use config::DbConfig;
pub use error::DbError;
pub use mapper::{map_rows, Record, ResultSet};
pub use query::{BuiltQuery, QueryOptions};
pub use store::Store;
pub use value::{Value, ValueMap};
