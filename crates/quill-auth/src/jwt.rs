//! Issuing and verifying HS256 access tokens.
//!
//! [`TokenService`] is what the auth service depends on. [`JwtTokenService`]
//! holds the signing keys built once from [`JwtConfig`]; the free functions
//! [`create_access_token`] and [`verify_token`] are for one-off callers such
//! as the CLI.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use quill_config::JwtConfig;
use quill_core::AppError;

use crate::claims::Claims;

/// Issues and verifies signed, expiring bearer tokens.
pub trait TokenService: Send + Sync + fmt::Debug {
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError>;

    /// Fails with `TokenInvalid` on a bad signature, a malformed token or an
    /// elapsed expiry.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}

pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_expiry: config.access_token_expiry,
        }
    }

    /// Signs arbitrary claims with this service's key.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now as usize,
            exp: (now + self.access_token_expiry) as usize,
        };

        self.encode_claims(&claims)
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AppError::token_invalid()
            })
    }
}

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    JwtTokenService::new(jwt_config).issue(user_id, email)
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    JwtTokenService::new(jwt_config).verify(token)
}
