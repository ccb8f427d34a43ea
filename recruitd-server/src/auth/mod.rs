//! Email/password authentication with signed session tokens

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use service::{AuthService, Session};
pub use token::{Claims, TokenSigner};
