use crate::AuthError;

/// Symmetric key shared by [`crate::TokenIssuer`] and [`crate::CredentialGate`].
///
/// Loaded once at startup and never mutated; wrap it in an `Arc` to share it.
/// Construction rejects an empty key, so a `SigningSecret` in hand is always usable.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::configuration("signing secret is empty"));
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(
            SigningSecret::new(Vec::new()),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = SigningSecret::new("hunter2").unwrap();
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
