//! Domain models
//!
//! Typed views over the generic records the data-access layer returns.

pub mod recruiter;
pub mod user;
pub mod validation;

pub use recruiter::{Recruiter, RecruiterInput};
pub use user::{Credentials, User};
pub use validation::ValidationError;
