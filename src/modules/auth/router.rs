use axum::{Router, routing::post};

use crate::modules::auth::controller::{login_user, register_user, verify_token};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/verify-token", post(verify_token))
}
