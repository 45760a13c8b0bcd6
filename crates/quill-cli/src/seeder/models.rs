//! Seed rows and the knobs that size a seeding run.

use quill_models::{CommentId, PostId, UserId};

/// Every seeded account uses this domain so `clear` can find them again.
///
/// `.invalid` is reserved (RFC 2606), so no real account can live here.
pub const SEED_EMAIL_DOMAIN: &str = "seed.quill.invalid";

/// Plaintext password shared by all seeded accounts.
pub const SEED_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct PostSeed {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

pub struct CommentSeed {
    pub id: CommentId,
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
}

/// `LIKE` pattern matching exactly the seeded accounts.
pub fn seed_email_pattern() -> String {
    format!("%@{}", SEED_EMAIL_DOMAIN)
}

pub fn is_seed_email(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain == SEED_EMAIL_DOMAIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub users: usize,
    pub posts_per_user: usize,
    pub comments_per_post: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            posts_per_user: 3,
            comments_per_post: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn with_posts_per_user(mut self, posts_per_user: usize) -> Self {
        self.posts_per_user = posts_per_user;
        self
    }

    pub fn with_comments_per_post(mut self, comments_per_post: usize) -> Self {
        self.comments_per_post = comments_per_post;
        self
    }

    pub fn total_posts(&self) -> usize {
        self.users * self.posts_per_user
    }

    pub fn total_comments(&self) -> usize {
        self.total_posts() * self.comments_per_post
    }
}
