//! Credential issuer: mints signed, time-limited tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use crate::{AuthError, IdentityClaims, PrincipalId, SigningSecret};

/// Fixed token lifetime: one hour from issuance. There is no refresh.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Mints HS256 tokens binding a principal to an expiry.
///
/// Stateless apart from the shared read-only secret; cheap to clone.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: Arc<SigningSecret>,
}

impl TokenIssuer {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        Self { secret }
    }

    /// Issue a token for `principal` valid for [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, principal: &PrincipalId) -> Result<String, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if the current instant were `now`.
    pub fn issue_at(&self, principal: &PrincipalId, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = IdentityClaims::new(
            principal.clone(),
            now,
            now + Duration::seconds(TOKEN_TTL_SECS),
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::configuration(format!("failed to sign token: {e}")))
    }
}
