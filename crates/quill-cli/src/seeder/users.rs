//! Fake user generation and bulk insertion.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use quill_models::UserId;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed, seed_email_pattern};

const BATCH_SIZE: usize = 5000;

/// Generates `count` users in parallel.
///
/// `run_tag` keeps emails unique across repeated seeding runs.
pub fn generate_users(count: usize, run_tag: &str, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+{}{}@{}",
                email_part(&first_name),
                email_part(&last_name),
                run_tag,
                idx,
                SEED_EMAIL_DOMAIN
            );

            UserSeed {
                id: UserId::new(),
                name: format!("{} {}", first_name, last_name),
                email,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

pub async fn seed_users(
    db: &PgPool,
    count: usize,
    run_tag: &str,
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count, run_tag, password_hash);
    insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        users.len(),
        start_time.elapsed()
    );

    Ok(users.into_iter().map(|u| u.id).collect())
}

/// Inserts users in chunks inside one transaction.
pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;

    for chunk in users.chunks(BATCH_SIZE) {
        insert_users_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(())
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<()> {
    if users.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = users.iter().map(|u| u.id.into_inner()).collect();
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    let hashes: Vec<&str> = users.iter().map(|u| u.password_hash.as_str()).collect();

    sqlx::query(
        r#"INSERT INTO users (id, name, email, password_hash)
           SELECT * FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::text[])"#,
    )
    .bind(&ids)
    .bind(&names)
    .bind(&emails)
    .bind(&hashes)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Deletes every seeded account. Their posts and comments go with them.
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(seed_email_pattern())
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
