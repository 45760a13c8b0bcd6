use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use quill_core::{AppError, ErrorResponse};
use quill_models::{
    CreatePostDto, MessageResponse, Post, PostFilterParams, PostId, PostWithRelations,
    UpdatePostDto,
};
use tracing::instrument;

use crate::modules::posts::service::PostService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 422, description = "Validation error or unknown author", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = PostService::create_post(state.posts.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get,
    path = "/posts",
    params(PostFilterParams),
    responses(
        (status = 200, description = "Posts with author and comments, newest first", body = Vec<PostWithRelations>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_posts(
    State(state): State<AppState>,
    Query(filters): Query<PostFilterParams>,
) -> Result<Json<Vec<PostWithRelations>>, AppError> {
    let posts = PostService::list_posts(state.posts.as_ref(), filters).await?;
    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post with author and comments", body = PostWithRelations),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<PostWithRelations>, AppError> {
    let post = PostService::get_post(state.posts.as_ref(), id).await?;
    Ok(Json(post))
}

#[utoipa::path(
    patch,
    path = "/posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Post ID")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state, dto))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    ValidatedJson(dto): ValidatedJson<UpdatePostDto>,
) -> Result<Json<Post>, AppError> {
    let post = PostService::update_post(state.posts.as_ref(), id, dto).await?;
    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = PostService::delete_post(state.posts.as_ref(), id).await?;
    Ok(Json(message))
}
