use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PrincipalId;

/// Identity claims carried inside a token.
///
/// Field names follow the registered JWT claim names so the encoded payload is
/// `{ "sub", "iat", "exp" }`. Times are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject / principal identifier.
    pub sub: PrincipalId,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl IdentityClaims {
    pub fn new(sub: PrincipalId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.sub
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of decoded claims.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::CredentialGate`] before this is called. There is no leeway: a
/// token is dead from its `exp` second onwards.
pub fn validate_claims(claims: &IdentityClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn claims_at(now: DateTime<Utc>, ttl: Duration) -> IdentityClaims {
        IdentityClaims::new(PrincipalId::new("user-1").unwrap(), now, now + ttl)
    }

    #[test]
    fn fresh_claims_are_valid() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims_at(now, Duration::hours(1)), now), Ok(()));
    }

    #[test]
    fn expiry_instant_itself_is_expired() {
        let now = Utc::now();
        let claims = claims_at(now, Duration::hours(1));
        let at_expiry = claims.expires_at().unwrap();
        assert_eq!(
            validate_claims(&claims, at_expiry),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let claims = claims_at(now, Duration::seconds(0));
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn serializes_with_registered_claim_names() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = claims_at(now, Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "user-1");
        assert_eq!(json["iat"], 1_700_000_000);
        assert_eq!(json["exp"], 1_700_003_600);
    }
}
