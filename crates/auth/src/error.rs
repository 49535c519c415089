use thiserror::Error;

/// Why a credential could not be located on a request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MissingCredential {
    #[error("authorization header missing")]
    Header,

    #[error("token missing")]
    Token,
}

/// Failures raised by the issuer and the gate.
///
/// Everything except `Configuration` and `InvalidPrincipal` is a per-request
/// rejection the caller can recover from by retrying with a valid credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Signing secret absent/empty, or the token could not be signed.
    #[error("auth configuration error: {0}")]
    Configuration(String),

    /// Principal id was empty.
    #[error("invalid principal id")]
    InvalidPrincipal,

    /// The request carried no metadata container at all.
    #[error("request metadata missing")]
    MalformedRequest,

    #[error(transparent)]
    MissingCredential(#[from] MissingCredential),

    /// Bad signature, malformed token or elapsed expiry (deliberately indistinguishable).
    #[error("invalid/expired token")]
    InvalidOrExpiredCredential,
}

impl AuthError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Configuration(_) => "configuration_error",
            AuthError::InvalidPrincipal => "invalid_principal",
            AuthError::MalformedRequest => "malformed_request",
            AuthError::MissingCredential(_) => "missing_credential",
            AuthError::InvalidOrExpiredCredential => "invalid_or_expired_credential",
        }
    }
}
