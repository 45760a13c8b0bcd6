//! # Quill Models
//!
//! Domain models and DTOs for the Quill API.
//!
//! - [`auth`]: register/login/verify-token requests and token responses
//! - [`comments`]: comments and their eager-loaded relations
//! - [`ids`]: strongly-typed entity identifiers
//! - [`posts`]: posts and their eager-loaded relations
//! - [`users`]: user accounts
//! - [`value_types`]: validated primitives such as [`Email`]
//!
//! Entities serialize with camelCase field names (`authorId`, `createdAt`).
//! The stored password digest only exists on [`UserCredentials`], which is
//! never serialized.

pub mod auth;
pub mod comments;
pub mod ids;
pub mod posts;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    AuthTokenResponse, LoginRequest, MessageResponse, RegisterRequest, VerifyTokenRequest,
};
pub use comments::{
    Comment, CommentFilterParams, CommentWithRelations, CreateCommentDto, UpdateCommentDto,
};
pub use ids::{CommentId, PostId, UserId};
pub use posts::{CreatePostDto, Post, PostFilterParams, PostWithRelations, UpdatePostDto};
pub use users::{CreateUserDto, UpdateUserDto, User, UserCredentials};
pub use value_types::{Email, ValueTypeError};
