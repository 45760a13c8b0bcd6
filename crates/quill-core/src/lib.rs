//! # Quill Core
//!
//! Core types, errors, and utilities for the Quill API.
//!
//! - [`errors`]: error taxonomy with HTTP response conversion
//! - [`password`]: salted password hashing and verification
//! - [`serde`]: custom deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{AppError, BcryptHasher, PasswordHasher};
//!
//! let hasher = BcryptHasher::default();
//! let digest = hasher.hash("secure_password")?;
//! assert!(hasher.verify("secure_password", &digest));
//!
//! let error = AppError::not_found(anyhow::anyhow!("Post not found"));
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{BcryptHasher, PasswordHasher, hash_password, verify_password};
