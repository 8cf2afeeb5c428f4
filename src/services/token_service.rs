//! Token service - Issues and verifies signed, time-limited bearer tokens.
//!
//! Tokens are HS256 JWTs carrying `{ userId, email, iat, exp }`. They are
//! never persisted; a token stays valid for its full lifetime.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub email: String,
}

/// Token service trait for dependency injection.
pub trait TokenService: Send + Sync {
    /// Sign a token for the given identity, valid from now.
    fn issue(&self, user_id: Uuid, email: &str) -> AppResult<String>;

    /// Verify signature, structure and expiry of a token.
    ///
    /// Fails with `ExpiredToken` once `now >= exp`, `InvalidToken` otherwise.
    fn verify(&self, token: &str) -> AppResult<TokenIdentity>;
}

/// HMAC-SHA256 JWT implementation of TokenService.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_seconds: i64,
}

impl JwtTokenService {
    /// Create a token service from a signing secret and lifetime.
    pub fn new(secret: &[u8], lifetime_seconds: i64) -> Self {
        // Expiry is checked here against an explicit clock with zero leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes(), config.jwt_expiration_seconds)
    }

    /// Sign a token as if issued at `issued_at` (unix seconds).
    pub fn issue_at(&self, user_id: Uuid, email: &str, issued_at: i64) -> AppResult<String> {
        let exp = issued_at
            .checked_add(self.lifetime_seconds)
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: issued_at,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> AppResult<TokenIdentity> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if now >= claims.exp {
            return Err(AppError::ExpiredToken);
        }

        Ok(TokenIdentity {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        self.issue_at(user_id, email, Utc::now().timestamp())
    }

    fn verify(&self, token: &str) -> AppResult<TokenIdentity> {
        self.verify_at(token, Utc::now().timestamp())
    }
}
