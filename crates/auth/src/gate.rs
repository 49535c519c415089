//! Credential gate: admits or rejects a single inbound request.
//!
//! Each call walks `metadata -> credential -> verified claims -> admitted`
//! from scratch and holds nothing between calls. A rejection at any step is
//! terminal for the request; the gate never retries and never logs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{
    AUTHORIZATION, AuthError, IdentityClaims, MissingCredential, RequestContext, RequestMetadata,
    SigningSecret, validate_claims,
};

#[derive(Debug, Clone)]
pub struct CredentialGate {
    secret: Arc<SigningSecret>,
    validation: Validation,
}

impl CredentialGate {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        // Signature/structure via jsonwebtoken (algorithm pinned); time window
        // via `validate_claims` against an explicit clock, zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self { secret, validation }
    }

    /// Authorize `ctx` against the current time.
    ///
    /// On success the decoded claims are attached to `ctx` and also returned.
    pub fn authorize(&self, ctx: &mut RequestContext) -> Result<IdentityClaims, AuthError> {
        self.authorize_at(ctx, Utc::now())
    }

    /// Authorize `ctx` as if the current instant were `now`.
    pub fn authorize_at(
        &self,
        ctx: &mut RequestContext,
        now: DateTime<Utc>,
    ) -> Result<IdentityClaims, AuthError> {
        let metadata = ctx.metadata().ok_or(AuthError::MalformedRequest)?;
        let token = extract_token(metadata)?;
        let claims = self.verify_at(token, now)?;

        ctx.attach_identity(claims.clone());
        Ok(claims)
    }

    /// Verify a bare token (signature, structure and expiry).
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, AuthError> {
        let claims = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &self.validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidOrExpiredCredential)?;

        validate_claims(&claims, now).map_err(|_| AuthError::InvalidOrExpiredCredential)?;
        Ok(claims)
    }
}

/// Pull the token out of `authorization: "<scheme> <token>"`.
///
/// The scheme word is not checked. The value is split on single spaces and
/// the second segment is the token, so `"Bearer  <t>"` carries an empty
/// token and `" Bearer <t>"` carries `"Bearer"`.
fn extract_token(metadata: &RequestMetadata) -> Result<&str, AuthError> {
    let header = metadata
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(MissingCredential::Header)?;

    let token = header
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(MissingCredential::Token)?;

    Ok(token)
}
