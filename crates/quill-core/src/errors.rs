//! Application error type and its HTTP mapping.
//!
//! Every failure a handler can produce is an [`AppError`]: an [`ErrorKind`]
//! from the fixed taxonomy, the HTTP status it is answered with, and the
//! underlying error for logs and the human-readable message.
//!
//! Responses always carry a machine-readable code next to the message:
//!
//! ```json
//! { "error": "Invalid email or password", "code": "INVALID_CREDENTIALS" }
//! ```

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// The closed set of failure kinds the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input, rejected before reaching a service.
    Validation,
    /// Registration or user write hit the unique email constraint.
    EmailAlreadyExists,
    /// Unknown email or wrong password. Callers cannot tell which.
    InvalidCredentials,
    /// Bad signature, malformed token, or elapsed expiry.
    TokenInvalid,
    /// A valid token whose subject no longer exists.
    UserNotFound,
    /// Generic missing resource.
    NotFound,
    /// Unexpected storage or library failure.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code sent to clients.
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::EmailAlreadyExists => "EMAIL_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenInvalid => "INVALID_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Default transport status for the kind.
    pub fn status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: kind.status(),
            error: err.into(),
        }
    }

    /// Overrides the status while keeping the kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    /// A validation failure on a well-formed body (field rules, foreign keys).
    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err).with_status(StatusCode::UNPROCESSABLE_ENTITY)
    }

    pub fn email_already_exists() -> Self {
        Self::new(ErrorKind::EmailAlreadyExists, anyhow!("Email already exists"))
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            anyhow!("Invalid email or password"),
        )
    }

    pub fn token_invalid() -> Self {
        Self::new(ErrorKind::TokenInvalid, anyhow!("Invalid or expired token"))
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, anyhow!("User not found"))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message,
            "code": self.kind.code(),
        }));

        (self.status, body).into_response()
    }
}
