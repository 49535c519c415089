//! `staffdir-auth`: credential issuance and the credential gate.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers hand
//! the gate a [`RequestContext`] built from whatever transport they use, and
//! the issuer is fed principal ids resolved elsewhere.

pub mod claims;
pub mod context;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod password;
pub mod principal;
pub mod secret;

pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use context::{AUTHORIZATION, RequestContext, RequestMetadata};
pub use error::{AuthError, MissingCredential};
pub use gate::CredentialGate;
pub use issuer::{TOKEN_TTL_SECS, TokenIssuer};
pub use password::{
    DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST, PasswordError, hash_password,
    verify_password,
};
pub use principal::PrincipalId;
pub use secret::SigningSecret;
