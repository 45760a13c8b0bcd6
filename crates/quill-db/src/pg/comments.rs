use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_models::{
    Comment, CommentId, CommentWithRelations, Email, Post, PostId, User, UserId,
};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::error::{DbError, DbResult};
use crate::repo::{CommentChanges, CommentRepository, NewComment};

const SELECT_COMMENTS_WITH_RELATIONS: &str = r#"
    SELECT c.id, c.content, c.post_id, c.author_id, c.created_at, c.updated_at,
           u.name AS author_name,
           u.email AS author_email,
           u.created_at AS author_created_at,
           u.updated_at AS author_updated_at,
           p.title AS post_title,
           p.content AS post_content,
           p.author_id AS post_author_id,
           p.created_at AS post_created_at,
           p.updated_at AS post_updated_at
    FROM comments c
    JOIN users u ON u.id = c.author_id
    JOIN posts p ON p.id = c.post_id
"#;

#[derive(FromRow)]
struct CommentRow {
    #[sqlx(flatten)]
    comment: Comment,
    author_name: String,
    author_email: Email,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
    post_title: String,
    post_content: String,
    post_author_id: UserId,
    post_created_at: DateTime<Utc>,
    post_updated_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentWithRelations {
    fn from(row: CommentRow) -> Self {
        let author = User {
            id: row.comment.author_id,
            name: row.author_name,
            email: row.author_email,
            created_at: row.author_created_at,
            updated_at: row.author_updated_at,
        };
        let post = Post {
            id: row.comment.post_id,
            title: row.post_title,
            content: row.post_content,
            author_id: row.post_author_id,
            created_at: row.post_created_at,
            updated_at: row.post_updated_at,
        };
        Self {
            comment: row.comment,
            author,
            post,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: NewComment) -> DbResult<Comment> {
        let created = sqlx::query_as::<_, Comment>(
            r#"INSERT INTO comments (id, content, post_id, author_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, content, post_id, author_id, created_at, updated_at"#,
        )
        .bind(CommentId::new())
        .bind(&comment.content)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> DbResult<Option<CommentWithRelations>> {
        let query = format!("{} WHERE c.id = $1", SELECT_COMMENTS_WITH_RELATIONS);
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentWithRelations::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, post_id: Option<PostId>) -> DbResult<Vec<CommentWithRelations>> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR c.post_id = $1) ORDER BY c.created_at DESC",
            SELECT_COMMENTS_WITH_RELATIONS
        );
        let rows = sqlx::query_as::<_, CommentRow>(&query)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentWithRelations::from).collect())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: CommentId, changes: CommentChanges) -> DbResult<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"UPDATE comments
               SET content = COALESCE($2, content),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, content, post_id, author_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
