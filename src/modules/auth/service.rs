//! Registration, login and token verification.

use std::sync::Arc;

use quill_auth::TokenService;
use quill_core::{AppError, PasswordHasher};
use quill_db::{NewUser, UserRepository};
use quill_models::{AuthTokenResponse, Email, LoginRequest, RegisterRequest, User, UserId};
use tracing::{info, instrument, warn};

use crate::metrics::{track_login, track_registration, track_token_verification};

/// Orchestrates the credential store, password hasher and token service.
///
/// Input shape is validated before this point; the service only enforces
/// uniqueness, credential checks and token validity.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<AuthTokenResponse, AppError> {
        let email = Email::new(dto.email).map_err(AppError::bad_request)?;
        let password_hash = self.hasher.hash(&dto.password)?;

        let user = self
            .users
            .create(NewUser {
                name: dto.name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    return AppError::email_already_exists();
                }
                e.into()
            })?;

        let access_token = self.tokens.issue(user.id.into_inner(), user.email.as_str())?;

        track_registration();
        info!(user_id = %user.id, "User registered");
        Ok(AuthTokenResponse { access_token })
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<AuthTokenResponse, AppError> {
        let Some(credentials) = self.users.find_by_email(&dto.email).await? else {
            track_login("failure");
            warn!("Login attempt for unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify(&dto.password, &credentials.password_hash) {
            track_login("failure");
            warn!(user_id = %credentials.user.id, "Login attempt with wrong password");
            return Err(AppError::invalid_credentials());
        }

        let user = credentials.user;
        let access_token = self.tokens.issue(user.id.into_inner(), user.email.as_str())?;

        track_login("success");
        info!(user_id = %user.id, "User logged in");
        Ok(AuthTokenResponse { access_token })
    }

    /// Resolves a bearer token to the user it was issued for.
    #[instrument(skip_all)]
    pub async fn verify_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token).inspect_err(|_| {
            track_token_verification("invalid");
        })?;

        let user_id = claims.user_id().map(UserId::from).ok_or_else(|| {
            track_token_verification("invalid");
            AppError::token_invalid()
        })?;

        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            track_token_verification("user_not_found");
            AppError::user_not_found()
        })?;

        track_token_verification("valid");
        Ok(user)
    }
}
