//! Process configuration, loaded once at startup.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use thiserror::Error;

use staffdir_auth::{
    AuthError, DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST, SigningSecret,
};

const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_address: String,
    /// Shared by the token issuer and the credential gate.
    pub jwt_secret: Arc<SigningSecret>,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let jwt_secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        let jwt_secret = Arc::new(SigningSecret::new(jwt_secret.as_bytes())?);

        let bind_address = match vars.get("BIND_ADDRESS") {
            Some(addr) => addr.clone(),
            None => {
                let port = match vars.get("PORT") {
                    Some(p) => p.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                        var: "PORT".to_string(),
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(c) => {
                let cost = c.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                    var: "BCRYPT_COST".to_string(),
                    reason: e.to_string(),
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::InvalidValue {
                        var: "BCRYPT_COST".to_string(),
                        reason: format!("{cost} is outside {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST}"),
                    });
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(ApiConfig {
            bind_address,
            jwt_secret,
            bcrypt_cost,
        })
    }
}
