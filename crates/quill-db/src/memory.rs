//! In-memory repositories for tests.
//!
//! Mirrors the Postgres behaviour the services rely on: unique emails,
//! foreign key checks, cascading deletes and newest-first ordering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use quill_models::{
    Comment, CommentId, CommentWithRelations, Post, PostId, PostWithRelations, User,
    UserCredentials, UserId,
};
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::repo::{
    CommentChanges, CommentRepository, NewComment, NewPost, NewUser, PostChanges, PostRepository,
    UserChanges, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    // Insertion order is kept so equal timestamps still list newest first.
    users: Vec<UserCredentials>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().map(|c| &c.user).find(|u| u.id == id)
    }

    fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|c| c.user.email.as_str() == email && Some(c.user.id) != except)
    }

    fn post_with_relations(&self, post: &Post) -> Option<PostWithRelations> {
        let author = self.user(post.author_id)?.clone();
        let comments = newest_first(
            self.comments
                .iter()
                .filter(|c| c.post_id == post.id)
                .cloned()
                .collect(),
            |c: &Comment| c.created_at,
        );
        Some(PostWithRelations {
            post: post.clone(),
            author,
            comments,
        })
    }

    fn comment_with_relations(&self, comment: &Comment) -> Option<CommentWithRelations> {
        Some(CommentWithRelations {
            comment: comment.clone(),
            author: self.user(comment.author_id)?.clone(),
            post: self.post(comment.post_id)?.clone(),
        })
    }
}

/// Reverses insertion order, then stable-sorts by creation time descending.
fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    items.reverse();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

/// Shared store backing all three in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users, for asserting that a rejected write left nothing behind.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// The stored digest for `email`, if any.
    pub async fn password_hash_of(&self, email: &str) -> Option<String> {
        self.tables
            .read()
            .await
            .users
            .iter()
            .find(|c| c.user.email.as_str() == email)
            .map(|c| c.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(user.email.as_str(), None) {
            return Err(DbError::UniqueViolation("users_email_key".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserCredentials>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .iter()
            .find(|c| c.user.email.as_str() == email)
            .cloned())
    }

    async fn find_many(&self) -> DbResult<Vec<User>> {
        let tables = self.tables.read().await;
        let users = tables.users.iter().map(|c| c.user.clone()).collect();
        Ok(newest_first(users, |u: &User| u.created_at))
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email
            && tables.email_taken(email.as_str(), Some(id))
        {
            return Err(DbError::UniqueViolation("users_email_key".to_string()));
        }

        let row = tables
            .users
            .iter_mut()
            .find(|c| c.user.id == id)
            .ok_or(DbError::NotFound)?;
        if let Some(name) = changes.name {
            row.user.name = name;
        }
        if let Some(email) = changes.email {
            row.user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            row.password_hash = hash;
        }
        row.user.updated_at = Utc::now();
        Ok(row.user.clone())
    }

    async fn delete(&self, id: UserId) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|c| c.user.id != id);
        if tables.users.len() == before {
            return Err(DbError::NotFound);
        }

        let orphaned: Vec<PostId> = tables
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|p| p.author_id != id);
        tables
            .comments
            .retain(|c| c.author_id != id && !orphaned.contains(&c.post_id));
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, post: NewPost) -> DbResult<Post> {
        let mut tables = self.tables.write().await;
        if tables.user(post.author_id).is_none() {
            return Err(DbError::ForeignKeyViolation(
                "posts_author_id_fkey".to_string(),
            ));
        }

        let now = Utc::now();
        let created = Post {
            id: PostId::new(),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PostId) -> DbResult<Option<PostWithRelations>> {
        let tables = self.tables.read().await;
        Ok(tables
            .post(id)
            .and_then(|post| tables.post_with_relations(post)))
    }

    async fn find_many(&self, author_id: Option<UserId>) -> DbResult<Vec<PostWithRelations>> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts
            .iter()
            .filter(|p| author_id.is_none_or(|a| p.author_id == a))
            .filter_map(|p| tables.post_with_relations(p))
            .collect();
        Ok(newest_first(posts, |p: &PostWithRelations| p.post.created_at))
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> DbResult<Post> {
        let mut tables = self.tables.write().await;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::NotFound)?;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(DbError::NotFound);
        }
        tables.comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: NewComment) -> DbResult<Comment> {
        let mut tables = self.tables.write().await;
        if tables.post(comment.post_id).is_none() {
            return Err(DbError::ForeignKeyViolation(
                "comments_post_id_fkey".to_string(),
            ));
        }
        if tables.user(comment.author_id).is_none() {
            return Err(DbError::ForeignKeyViolation(
                "comments_author_id_fkey".to_string(),
            ));
        }

        let now = Utc::now();
        let created = Comment {
            id: CommentId::new(),
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CommentId) -> DbResult<Option<CommentWithRelations>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| tables.comment_with_relations(c)))
    }

    async fn find_many(&self, post_id: Option<PostId>) -> DbResult<Vec<CommentWithRelations>> {
        let tables = self.tables.read().await;
        let comments = tables
            .comments
            .iter()
            .filter(|c| post_id.is_none_or(|p| c.post_id == p))
            .filter_map(|c| tables.comment_with_relations(c))
            .collect();
        Ok(newest_first(comments, |c: &CommentWithRelations| {
            c.comment.created_at
        }))
    }

    async fn update(&self, id: CommentId, changes: CommentChanges) -> DbResult<Comment> {
        let mut tables = self.tables.write().await;
        let comment = tables
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DbError::NotFound)?;
        if let Some(content) = changes.content {
            comment.content = content;
        }
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete(&self, id: CommentId) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_models::Email;

    async fn seed_user(store: &MemoryStore, email: &str) -> User {
        UserRepository::create(
            store,
            NewUser {
                name: "A".to_string(),
                email: Email::new_unchecked(email),
                password_hash: "digest".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        seed_user(&store, "a@x.com").await;

        let err = UserRepository::create(
            &store,
            NewUser {
                name: "B".to_string(),
                email: Email::new_unchecked("a@x.com"),
                password_hash: "digest".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_post_for_missing_author_is_foreign_key_violation() {
        let store = MemoryStore::new();
        let err = PostRepository::create(
            &store,
            NewPost {
                title: "T".to_string(),
                content: "C".to_string(),
                author_id: UserId::new(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "a@x.com").await;
        let post = PostRepository::create(
            &store,
            NewPost {
                title: "T".to_string(),
                content: "C".to_string(),
                author_id: user.id,
            },
        )
        .await
        .unwrap();
        CommentRepository::create(
            &store,
            NewComment {
                content: "hi".to_string(),
                post_id: post.id,
                author_id: user.id,
            },
        )
        .await
        .unwrap();

        UserRepository::delete(&store, user.id).await.unwrap();

        assert!(PostRepository::find_many(&store, None).await.unwrap().is_empty());
        assert!(CommentRepository::find_many(&store, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let store = MemoryStore::new();
        let first = seed_user(&store, "first@x.com").await;
        let second = seed_user(&store, "second@x.com").await;

        let users = UserRepository::find_many(&store).await.unwrap();
        assert_eq!(users[0].id, second.id);
        assert_eq!(users[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let err = PostRepository::update(&store, PostId::new(), PostChanges::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
