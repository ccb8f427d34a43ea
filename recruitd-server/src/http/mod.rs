//! HTTP layer
//!
//! Thin handlers over the data-access verbs and the auth service. Every
//! response uses the `{success, data}` / `{success, message}` envelope.

pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
