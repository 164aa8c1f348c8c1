//! Signed credentials: HS256 JWTs carrying the user id as `sub`.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const CREDENTIAL_VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential expired")]
    Expired,

    #[error("invalid credential")]
    Invalid,

    #[error("could not sign credential: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct CredentialIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl CredentialIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(CREDENTIAL_VALIDITY_DAYS),
        }
    }

    #[cfg(test)]
    fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Issues a credential for `user_id`, valid for 30 days.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Verifies signature and expiry, returning the user the credential was issued to.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid,
            })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Invalid)
    }
}
