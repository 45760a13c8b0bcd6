use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use quill_core::{AppError, ErrorResponse};
use quill_models::{
    Comment, CommentFilterParams, CommentId, CommentWithRelations, CreateCommentDto,
    MessageResponse, UpdateCommentDto,
};
use tracing::instrument;

use crate::modules::comments::service::CommentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 422, description = "Validation error, unknown post or author", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip_all)]
pub async fn create_comment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = CommentService::create_comment(state.comments.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    get,
    path = "/comments",
    params(CommentFilterParams),
    responses(
        (status = 200, description = "Comments with author and post, newest first", body = Vec<CommentWithRelations>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Query(filters): Query<CommentFilterParams>,
) -> Result<Json<Vec<CommentWithRelations>>, AppError> {
    let comments = CommentService::list_comments(state.comments.as_ref(), filters).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment with author and post", body = CommentWithRelations),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> Result<Json<CommentWithRelations>, AppError> {
    let comment = CommentService::get_comment(state.comments.as_ref(), id).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    patch,
    path = "/comments/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state, dto))]
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<Comment>, AppError> {
    let comment = CommentService::update_comment(state.comments.as_ref(), id, dto).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = CommentService::delete_comment(state.comments.as_ref(), id).await?;
    Ok(Json(message))
}
