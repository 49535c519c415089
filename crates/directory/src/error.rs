use thiserror::Error;

use staffdir_auth::{AuthError, PasswordError};
use staffdir_core::DomainError;

/// Operation-level rejection surfaced to the caller.
///
/// Gate failures pass through untouched in `Auth` so their message can be
/// shown to the end client verbatim.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectoryError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Email is already registered.")]
    EmailTaken,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}
