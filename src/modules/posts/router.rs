use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::posts::controller::{
    create_post, delete_post, get_post, get_posts, update_post,
};
use crate::state::AppState;

pub fn init_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post).get(get_posts))
        .route(
            "/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
}
