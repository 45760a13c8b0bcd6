use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_models::{Comment, Email, Post, PostId, PostWithRelations, User, UserId};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repo::{NewPost, PostChanges, PostRepository};

const SELECT_POSTS_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.content, p.author_id, p.created_at, p.updated_at,
           u.name AS author_name,
           u.email AS author_email,
           u.created_at AS author_created_at,
           u.updated_at AS author_updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// A post joined with its author's columns.
#[derive(FromRow)]
struct PostAuthorRow {
    #[sqlx(flatten)]
    post: Post,
    author_name: String,
    author_email: Email,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl PostAuthorRow {
    fn into_parts(self) -> (Post, User) {
        let author = User {
            id: self.post.author_id,
            name: self.author_name,
            email: self.author_email,
            created_at: self.author_created_at,
            updated_at: self.author_updated_at,
        };
        (self.post, author)
    }
}

#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the comments of every row in one query and attaches them.
    async fn attach_comments(&self, rows: Vec<PostAuthorRow>) -> DbResult<Vec<PostWithRelations>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.post.id.into_inner()).collect();

        let comments = sqlx::query_as::<_, Comment>(
            r#"SELECT id, content, post_id, author_id, created_at, updated_at
               FROM comments
               WHERE post_id = ANY($1)
               ORDER BY created_at DESC"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_post: HashMap<PostId, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let (post, author) = row.into_parts();
                let comments = by_post.remove(&post.id).unwrap_or_default();
                PostWithRelations {
                    post,
                    author,
                    comments,
                }
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: NewPost) -> DbResult<Post> {
        let created = sqlx::query_as::<_, Post>(
            r#"INSERT INTO posts (id, title, content, author_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, title, content, author_id, created_at, updated_at"#,
        )
        .bind(PostId::new())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> DbResult<Option<PostWithRelations>> {
        let query = format!("{} WHERE p.id = $1", SELECT_POSTS_WITH_AUTHOR);
        let row = sqlx::query_as::<_, PostAuthorRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.attach_comments(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_many(&self, author_id: Option<UserId>) -> DbResult<Vec<PostWithRelations>> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR p.author_id = $1) ORDER BY p.created_at DESC",
            SELECT_POSTS_WITH_AUTHOR
        );
        let rows = sqlx::query_as::<_, PostAuthorRow>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;

        self.attach_comments(rows).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: PostId, changes: PostChanges) -> DbResult<Post> {
        sqlx::query_as::<_, Post>(
            r#"UPDATE posts
               SET title = COALESCE($2, title),
                   content = COALESCE($3, content),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, title, content, author_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
