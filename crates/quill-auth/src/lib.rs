//! # Quill Auth
//!
//! Bearer tokens for the Quill API: the [`Claims`] they carry and the
//! [`TokenService`] that signs and checks them.
//!
//! # Example
//!
//! ```ignore
//! use quill_auth::{JwtTokenService, TokenService};
//! use quill_config::JwtConfig;
//!
//! let tokens = JwtTokenService::new(&JwtConfig::from_env());
//! let token = tokens.issue(user_id, "ada@example.com")?;
//! let claims = tokens.verify(&token)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{JwtTokenService, TokenService, create_access_token, verify_token};
