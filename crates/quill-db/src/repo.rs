//! Repository traits the services are written against.
//!
//! Each trait covers one table. Implementations report constraint failures
//! through [`DbError`] and never decide HTTP semantics themselves.

use async_trait::async_trait;
use quill_models::{
    Comment, CommentId, CommentWithRelations, Email, Post, PostId, PostWithRelations, User,
    UserCredentials, UserId,
};

use crate::error::DbResult;

/// Fields needed to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}

/// Partial user update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub content: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`DbError::UniqueViolation`](crate::DbError::UniqueViolation) on a taken email.
    async fn create(&self, user: NewUser) -> DbResult<User>;

    async fn find_by_id(&self, id: UserId) -> DbResult<Option<User>>;

    /// Credential lookup for login; the only read that returns the digest.
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserCredentials>>;

    /// Newest first.
    async fn find_many(&self) -> DbResult<Vec<User>>;

    async fn update(&self, id: UserId, changes: UserChanges) -> DbResult<User>;

    async fn delete(&self, id: UserId) -> DbResult<()>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> DbResult<Post>;

    async fn find_by_id(&self, id: PostId) -> DbResult<Option<PostWithRelations>>;

    /// Newest first, optionally restricted to one author.
    async fn find_many(&self, author_id: Option<UserId>) -> DbResult<Vec<PostWithRelations>>;

    async fn update(&self, id: PostId, changes: PostChanges) -> DbResult<Post>;

    async fn delete(&self, id: PostId) -> DbResult<()>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> DbResult<Comment>;

    async fn find_by_id(&self, id: CommentId) -> DbResult<Option<CommentWithRelations>>;

    /// Newest first, optionally restricted to one post.
    async fn find_many(&self, post_id: Option<PostId>) -> DbResult<Vec<CommentWithRelations>>;

    async fn update(&self, id: CommentId, changes: CommentChanges) -> DbResult<Comment>;

    async fn delete(&self, id: CommentId) -> DbResult<()>;
}
