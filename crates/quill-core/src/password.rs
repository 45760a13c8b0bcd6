//! Password hashing built on bcrypt.
//!
//! Digests embed their own salt and cost, so verification needs nothing but
//! the stored string. [`PasswordHasher`] is the seam the auth service depends
//! on; [`BcryptHasher`] is the only production implementation.

use std::fmt;

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;

/// Turns plaintext into a stored digest and checks plaintext against one.
///
/// Implementations hold no mutable state and are shared across requests.
pub trait PasswordHasher: Send + Sync + fmt::Debug {
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Returns `false` on mismatch and on digests it cannot parse.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password, self.cost)
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        match verify_password(password, digest) {
            Ok(matches) => matches,
            Err(err) => {
                tracing::warn!(error = %err, "Stored password digest could not be parsed");
                false
            }
        }
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
