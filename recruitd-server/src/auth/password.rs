// Password hashing and verification

use bcrypt::{hash, verify};

use super::error::{AuthError, AuthResult};

/// bcrypt cost used for stored passwords
pub const BCRYPT_COST: u32 = 12;

/// Hash a password on the blocking pool (bcrypt is CPU-bound).
///
/// The returned string embeds its own salt and cost.
pub async fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("task join error: {}", e)))?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub async fn verify_password(password: &str, hashed: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("task join error: {}", e)))?
}
