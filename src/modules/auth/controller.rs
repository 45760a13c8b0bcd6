use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use quill_core::{AppError, ErrorResponse};
use quill_models::{AuthTokenResponse, LoginRequest, RegisterRequest, User, VerifyTokenRequest};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthTokenResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthTokenResponse>), AppError> {
    let response = state.auth_service().register(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthTokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthTokenResponse>, AppError> {
    let response = state.auth_service().login(dto).await?;
    Ok(Json(response))
}

/// Resolve an access token to its user
#[utoipa::path(
    post,
    path = "/auth/verify-token",
    request_body = VerifyTokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = User),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyTokenRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.auth_service().verify_token(&dto.token).await?;
    Ok(Json(user))
}
