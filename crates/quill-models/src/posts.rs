//! Posts and their eager-loaded relations.

use chrono::{DateTime, Utc};
use quill_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::comments::Comment;
use crate::ids::{PostId, UserId};
use crate::users::User;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[schema(example = "Hello, world")]
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post with its author and comments (newest first).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub author: User,
    pub comments: Vec<Comment>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    #[schema(example = "Hello, world")]
    pub title: String,
    #[validate(length(min = 1, message = "content should not be empty"))]
    pub content: String,
    pub author_id: UserId,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content should not be empty"))]
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostFilterParams {
    /// Only return posts written by this user
    #[serde(rename = "authorId", default, deserialize_with = "deserialize_optional_uuid")]
    pub author_id: Option<Uuid>,
}

impl PostFilterParams {
    pub fn author_id(&self) -> Option<UserId> {
        self.author_id.map(UserId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_types::Email;

    #[test]
    fn test_relations_flatten_post_fields() {
        let author = User {
            id: UserId::new(),
            name: "A".to_string(),
            email: Email::new_unchecked("a@x.com"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let post = Post {
            id: PostId::new(),
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: author.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(PostWithRelations {
            post,
            author,
            comments: vec![],
        })
        .unwrap();

        assert_eq!(json["title"], "T");
        assert!(json.get("authorId").is_some());
        assert_eq!(json["author"]["name"], "A");
        assert_eq!(json["comments"], serde_json::json!([]));
    }

    #[test]
    fn test_create_dto_reads_camel_case_author() {
        let author = UserId::new();
        let dto: CreatePostDto = serde_json::from_value(serde_json::json!({
            "title": "T",
            "content": "C",
            "authorId": author,
        }))
        .unwrap();
        assert_eq!(dto.author_id, author);
    }
}
