use std::sync::Arc;

use quill_auth::{JwtTokenService, TokenService};
use quill_config::{AppConfig, CorsConfig};
use quill_core::{BcryptHasher, PasswordHasher};
use quill_db::{
    CommentRepository, PostRepository, Repositories, UserRepository, init_db_pool,
    run_migrations,
};

use crate::modules::auth::service::AuthService;

/// Shared, immutable state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(repos: Repositories, config: &AppConfig) -> Self {
        Self {
            users: repos.users,
            posts: repos.posts,
            comments: repos.comments,
            hasher: Arc::new(BcryptHasher::new(config.password.bcrypt_cost)),
            tokens: Arc::new(JwtTokenService::new(&config.jwt)),
            cors_config: config.cors.clone(),
        }
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Connects to PostgreSQL, applies pending migrations and builds the state.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool(&config.database).await?;
    run_migrations(&pool).await?;
    Ok(AppState::new(Repositories::postgres(pool), config))
}
