// src/utils/jwt.rs

use std::time::Duration;

use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the user's email. Optional so a token without it can be
    /// rejected instead of failing deserialization in a different way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued-at as Unix timestamp.
    pub iat: u64,
    /// Expiration time as Unix timestamp.
    pub exp: u64,
}

/// Signs and verifies access tokens with the configured shared secret.
///
/// Built once from [`Config`] and cloned into whoever needs it.
/// The keys are never printed, so this type deliberately has no `Debug`.
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &Config) -> Self {
        let secret = config.secret_key.expose_secret().as_bytes();

        let mut validation = Validation::new(config.algorithm);
        // Expiry is exact: a token is dead the second after `exp`.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            header: Header::new(config.algorithm),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl: config.token_ttl,
        }
    }

    /// Signs a new token for `subject`, valid for `ttl` or the configured default.
    pub fn encode(&self, subject: &str, ttl: Option<Duration>) -> Result<String, AppError> {
        let now = get_current_timestamp();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let claims = Claims {
            sub: Some(subject.to_owned()),
            iat: now,
            exp: now.saturating_add(ttl.as_secs()),
        };

        self.sign(&claims)
    }

    /// Returns the subject of a valid token.
    ///
    /// Bad signature, expiry, wrong algorithm, garbage input and a missing
    /// subject all come back as `None`.
    pub fn decode(&self, token: &str) -> Option<String> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims.sub,
            Err(e) => {
                tracing::debug!(reason = ?e.kind(), "Token rejected");
                None
            }
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }
}
