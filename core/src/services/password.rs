//! Credential verifier: bcrypt hashing and comparison.
//!
//! bcrypt at cost 12 is CPU-heavy, so both operations run on the blocking
//! thread pool instead of the async workers.

use aegis_shared::validation::is_password_too_long;
use once_cell::sync::Lazy;
use tracing::error;

use crate::errors::{DomainError, DomainResult};

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 12;

/// Hash compared against when no account matches, so unknown emails cost the
/// same as wrong passwords
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| bcrypt::hash("aegis-timing-equalizer", BCRYPT_COST).ok());

/// Hash a plaintext password
///
/// Input longer than bcrypt reads is refused rather than truncated.
pub async fn hash_password(password: &str) -> DomainResult<String> {
    if is_password_too_long(password) {
        return Err(DomainError::validation("password must be at most 72 bytes long"));
    }
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            DomainError::internal(format!("password hashing failed: {}", e))
        })
}

/// Compare a plaintext password against a stored hash
///
/// A malformed hash, an over-long password or any other failure yields
/// `false`.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    if is_password_too_long(password) {
        verify_dummy(password).await;
        return false;
    }
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

/// Burn one verification's worth of CPU without a real hash
pub async fn verify_dummy(password: &str) {
    let password = password.to_owned();
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = bcrypt::verify(password, hash);
        }
    })
    .await;
}
