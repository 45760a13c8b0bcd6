//! Comments and their eager-loaded relations.

use chrono::{DateTime, Utc};
use quill_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::ids::{CommentId, PostId, UserId};
use crate::posts::Post;
use crate::users::User;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[schema(example = "Great post!")]
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment with its author and the post it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CommentWithRelations {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: User,
    pub post: Post,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "content should not be empty"))]
    #[schema(example = "Great post!")]
    pub content: String,
    pub post_id: PostId,
    pub author_id: UserId,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, message = "content should not be empty"))]
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentFilterParams {
    /// Only return comments on this post
    #[serde(rename = "postId", default, deserialize_with = "deserialize_optional_uuid")]
    pub post_id: Option<Uuid>,
}

impl CommentFilterParams {
    pub fn post_id(&self) -> Option<PostId> {
        self.post_id.map(PostId::from)
    }
}
