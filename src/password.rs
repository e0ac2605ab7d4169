//! Password hashing with bcrypt.
//!
//! Hashing runs on the blocking pool; at the default cost one hash takes a
//! noticeable slice of CPU time.

use crate::error::{AppError, AppResult};

/// Cost used when none is configured.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))??;
    Ok(hashed)
}

/// Check `password` against a value produced by [`hash_password`].
pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    Ok(bcrypt::verify(password, hashed)?)
}
