//! # Quill DB
//!
//! Database pool, repositories and storage errors for the Quill API.
//!
//! Services never touch SQL directly; they depend on the traits in [`repo`].
//! [`pg`] implements them over a `sqlx` PostgreSQL pool. With the
//! `test-utils` feature, [`memory::MemoryStore`] implements them in memory.
//!
//! # Example
//!
//! ```ignore
//! use quill_config::DatabaseConfig;
//! use quill_db::{Repositories, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::postgres(pool);
//! ```

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod pg;
pub mod repo;

use std::sync::Arc;

use quill_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use error::{DbError, DbResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use pg::{PgCommentRepository, PgPostRepository, PgUserRepository};
pub use repo::{
    CommentChanges, CommentRepository, NewComment, NewPost, NewUser, PostChanges, PostRepository,
    UserChanges, UserRepository,
};
pub use sqlx::PgPool;

/// Opens a PostgreSQL pool sized from the config.
///
/// Call once at startup; the pool is cheap to clone.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// One handle per repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool)),
        }
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            comments: Arc::new(store),
        }
    }
}
