//! Authentication errors
//!
//! Messages on the client-facing variants are shown to users verbatim.

use crate::db::DbError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter an email and password.")]
    MissingCredentials,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("User with this email already exists.")]
    EmailTaken,

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Please provide a bearer token.")]
    MalformedAuthorization,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Db(#[from] DbError),
}
