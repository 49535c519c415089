//! Password hashing for the identity-establishing operations (signup/login).

use thiserror::Error;

/// Default bcrypt cost factor (2^10 rounds).
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Cost range bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("invalid bcrypt cost: {0} (must be 4-31)")]
    InvalidCost(u32),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("password verification failed: {0}")]
    Verify(String),
}

/// Hash `plain` with bcrypt at `cost`.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, PasswordError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(PasswordError::InvalidCost(cost));
    }
    bcrypt::hash(plain, cost).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check `plain` against a stored bcrypt hash.
///
/// `Ok(false)` means a well-formed hash that does not match; `Err` means the
/// stored hash itself is unusable.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plain, hash).map_err(|e| PasswordError::Verify(e.to_string()))
}
