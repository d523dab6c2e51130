//! JWT issuance and validation
//!
//! Tokens are HS256-signed, carry the username as subject, and are never
//! persisted server-side: a token is valid iff its signature checks out
//! against the server secret and its expiry has not elapsed.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user.
    pub sub: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Random token id.
    pub jti: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("invalid or expired token")]
    Invalid,
}

/// Mints and validates bearer tokens. Cheap to clone; held in app state.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
    validation: Validation,
}

impl JwtManager {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway: no grace window. A token is accepted through its
        // exp second and rejected strictly after, consistently.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
            validation,
        }
    }

    /// Sign a token for the given username. Returns the token and its jti.
    pub fn generate_token(&self, username: &str) -> Result<(String, String), JwtError> {
        let now = OffsetDateTime::now_utc();
        let jti = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).unix_timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::Signing)?;

        Ok((token, jti))
    }

    /// Validate signature and expiry, returning the claims on success.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::Invalid)
    }
}
