//! Fake post and comment generation and bulk insertion.

use std::time::Instant;

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use quill_models::{CommentId, PostId, UserId};
use rayon::prelude::*;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{CommentSeed, PostSeed};

const BATCH_SIZE: usize = 5000;

pub fn generate_posts(author_ids: &[UserId], posts_per_user: usize) -> Vec<PostSeed> {
    author_ids
        .par_iter()
        .flat_map(|&author_id| {
            (0..posts_per_user)
                .map(|_| {
                    let title: String = Sentence(3..8).fake();
                    PostSeed {
                        id: PostId::new(),
                        title: title.trim_end_matches('.').to_string(),
                        content: Paragraph(2..6).fake(),
                        author_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Generates comments for each post, each written by a random seeded user.
pub fn generate_comments(
    post_ids: &[PostId],
    author_ids: &[UserId],
    comments_per_post: usize,
) -> Vec<CommentSeed> {
    if author_ids.is_empty() {
        return Vec::new();
    }

    post_ids
        .par_iter()
        .flat_map(|&post_id| {
            (0..comments_per_post)
                .map(|_| {
                    let author = (0..author_ids.len()).fake::<usize>();
                    CommentSeed {
                        id: CommentId::new(),
                        content: Sentence(4..16).fake(),
                        post_id,
                        author_id: author_ids[author],
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_posts(
    db: &PgPool,
    author_ids: &[UserId],
    posts_per_user: usize,
) -> anyhow::Result<Vec<PostId>> {
    let start_time = Instant::now();
    println!(
        "📝 Seeding {} posts ({} per user)...",
        author_ids.len() * posts_per_user,
        posts_per_user
    );

    let posts = generate_posts(author_ids, posts_per_user);
    let mut tx = db.begin().await?;
    for chunk in posts.chunks(BATCH_SIZE) {
        let ids: Vec<Uuid> = chunk.iter().map(|p| p.id.into_inner()).collect();
        let titles: Vec<&str> = chunk.iter().map(|p| p.title.as_str()).collect();
        let contents: Vec<&str> = chunk.iter().map(|p| p.content.as_str()).collect();
        let authors: Vec<Uuid> = chunk.iter().map(|p| p.author_id.into_inner()).collect();

        sqlx::query(
            r#"INSERT INTO posts (id, title, content, author_id)
               SELECT * FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::uuid[])"#,
        )
        .bind(&ids)
        .bind(&titles)
        .bind(&contents)
        .bind(&authors)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} posts in {:?}",
        posts.len(),
        start_time.elapsed()
    );

    Ok(posts.into_iter().map(|p| p.id).collect())
}

pub async fn seed_comments(
    db: &PgPool,
    post_ids: &[PostId],
    author_ids: &[UserId],
    comments_per_post: usize,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!(
        "💬 Seeding {} comments ({} per post)...",
        post_ids.len() * comments_per_post,
        comments_per_post
    );

    let comments = generate_comments(post_ids, author_ids, comments_per_post);
    let mut tx = db.begin().await?;
    for chunk in comments.chunks(BATCH_SIZE) {
        let ids: Vec<Uuid> = chunk.iter().map(|c| c.id.into_inner()).collect();
        let contents: Vec<&str> = chunk.iter().map(|c| c.content.as_str()).collect();
        let posts: Vec<Uuid> = chunk.iter().map(|c| c.post_id.into_inner()).collect();
        let authors: Vec<Uuid> = chunk.iter().map(|c| c.author_id.into_inner()).collect();

        sqlx::query(
            r#"INSERT INTO comments (id, content, post_id, author_id)
               SELECT * FROM UNNEST($1::uuid[], $2::text[], $3::uuid[], $4::uuid[])"#,
        )
        .bind(&ids)
        .bind(&contents)
        .bind(&posts)
        .bind(&authors)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} comments in {:?}",
        comments.len(),
        start_time.elapsed()
    );

    Ok(comments.len())
}
