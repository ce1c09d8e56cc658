//! Token issuance and verification
//!
//! Signed bearer tokens carrying a subject id and an absolute expiry.
//! Keys are pre-computed once at startup; token validity is a pure
//! function of (token bytes, current time, server secret) and never
//! touches a store.

use crate::auth::AuthError;
use crate::config::AuthConfig;
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Token claims
///
/// Deserialization is the structural check: a token without a subject
/// or expiry never produces a `Claims` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject claim into a user id
    pub fn subject(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// Pre-computed signing keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    /// Create new keys from the shared secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token service for issuing and verifying bearer tokens
///
/// Built once from [`AuthConfig`] and cloned cheaply into handlers.
/// Rotating the secret or algorithm invalidates all outstanding tokens.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    pub fn new(secret: &str, algorithm: Algorithm, expire_minutes: i64) -> Self {
        let mut validation = Validation::new(algorithm);
        // Expiry is exact: a token is rejected the second it lapses.
        validation.leeway = 0;

        Self {
            keys: TokenKeys::new(secret),
            algorithm,
            validation,
            ttl: Duration::minutes(expire_minutes),
        }
    }

    /// Build the service from the auth section of the app configuration
    ///
    /// Fails at startup when the configured algorithm identifier is not
    /// recognized.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm)
            .map_err(|_| anyhow::anyhow!("Unsupported signing algorithm: {}", config.algorithm))?;
        Ok(Self::new(
            &config.secret_key,
            algorithm,
            config.access_token_expire_minutes,
        ))
    }

    /// Issue a token for a subject with the default TTL
    #[inline]
    pub fn issue(&self, subject: Uuid) -> Result<String> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// Issue a token for a subject with a caller-chosen TTL
    pub fn issue_with_ttl(&self, subject: Uuid, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a token and return its claims
    ///
    /// An elapsed expiry is the only failure reported as [`AuthError::Expired`];
    /// every other decode failure (bad signature, malformed structure,
    /// missing claims, wrong algorithm) is [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Verify a token and resolve its subject id in one step
    #[inline]
    pub fn verify_subject(&self, token: &str) -> Result<Uuid, AuthError> {
        self.verify(token)?.subject()
    }

    /// Default token lifetime in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
