//! Bulk fake-data seeding for users, posts and comments.
//!
//! Rows are generated in parallel with rayon, then inserted with one
//! `UNNEST` statement per chunk. Seeded users share the
//! [`SEED_EMAIL_DOMAIN`] so [`clear_all`] removes exactly what was seeded.

pub mod models;
pub mod posts;
pub mod users;

use std::time::Instant;

use sqlx::PgPool;
use uuid::Uuid;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

/// Totals from one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

pub async fn seed_all(
    db: &PgPool,
    config: &SeedConfig,
    password_hash: &str,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let run_tag = Uuid::new_v4().simple().to_string()[..8].to_string();

    let user_ids = users::seed_users(db, config.users, &run_tag, password_hash).await?;
    let post_ids = posts::seed_posts(db, &user_ids, config.posts_per_user).await?;
    let comments =
        posts::seed_comments(db, &post_ids, &user_ids, config.comments_per_post).await?;

    let summary = SeedSummary {
        users: user_ids.len(),
        posts: post_ids.len(),
        comments,
    };

    println!(
        "\n✅ Seeded {} users, {} posts and {} comments in {:?}",
        summary.users,
        summary.posts,
        summary.comments,
        start_time.elapsed()
    );
    println!("   Seeded accounts log in with password: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes all seeded users along with their posts and comments.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<u64> {
    let deleted = users::clear_users(db).await?;
    println!("\n✅ Cleared seeded data");
    Ok(deleted)
}
