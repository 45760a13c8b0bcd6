use quill_core::AppError;
use quill_db::{CommentChanges, CommentRepository, DbError, NewComment};
use quill_models::{
    Comment, CommentFilterParams, CommentId, CommentWithRelations, CreateCommentDto,
    MessageResponse, UpdateCommentDto,
};
use tracing::instrument;

pub struct CommentService;

impl CommentService {
    /// Fails with a validation error when the post or the author does not exist.
    #[instrument(skip(repo, dto), fields(post_id = %dto.post_id))]
    pub async fn create_comment(
        repo: &dyn CommentRepository,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        repo.create(NewComment {
            content: dto.content,
            post_id: dto.post_id,
            author_id: dto.author_id,
        })
        .await
        .map_err(|e| e.for_resource("Comment"))
    }

    #[instrument(skip(repo))]
    pub async fn list_comments(
        repo: &dyn CommentRepository,
        filters: CommentFilterParams,
    ) -> Result<Vec<CommentWithRelations>, AppError> {
        Ok(repo.find_many(filters.post_id()).await?)
    }

    #[instrument(skip(repo))]
    pub async fn get_comment(
        repo: &dyn CommentRepository,
        id: CommentId,
    ) -> Result<CommentWithRelations, AppError> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound.for_resource("Comment"))
    }

    #[instrument(skip(repo, dto))]
    pub async fn update_comment(
        repo: &dyn CommentRepository,
        id: CommentId,
        dto: UpdateCommentDto,
    ) -> Result<Comment, AppError> {
        repo.update(
            id,
            CommentChanges {
                content: dto.content,
            },
        )
        .await
        .map_err(|e| e.for_resource("Comment"))
    }

    #[instrument(skip(repo))]
    pub async fn delete_comment(
        repo: &dyn CommentRepository,
        id: CommentId,
    ) -> Result<MessageResponse, AppError> {
        repo.delete(id)
            .await
            .map_err(|e| e.for_resource("Comment"))?;
        Ok(MessageResponse::new("Comment deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::ErrorKind;
    use quill_db::{MemoryStore, NewPost, NewUser, PostRepository, UserRepository};
    use quill_models::{Email, PostId, UserId};

    async fn seed(store: &MemoryStore) -> (UserId, PostId) {
        let author = UserRepository::create(
            store,
            NewUser {
                name: "Author".to_string(),
                email: Email::new_unchecked("author@x.com"),
                password_hash: "digest".to_string(),
            },
        )
        .await
        .unwrap();
        let post = PostRepository::create(
            store,
            NewPost {
                title: "T".to_string(),
                content: "C".to_string(),
                author_id: author.id,
            },
        )
        .await
        .unwrap();
        (author.id, post.id)
    }

    #[tokio::test]
    async fn test_comment_includes_author_and_post() {
        let store = MemoryStore::new();
        let (author_id, post_id) = seed(&store).await;

        let comment = CommentService::create_comment(
            &store,
            CreateCommentDto {
                content: "Nice".to_string(),
                post_id,
                author_id,
            },
        )
        .await
        .unwrap();

        let found = CommentService::get_comment(&store, comment.id).await.unwrap();
        assert_eq!(found.comment.content, "Nice");
        assert_eq!(found.author.id, author_id);
        assert_eq!(found.post.id, post_id);
    }

    #[tokio::test]
    async fn test_unknown_post_is_validation_error() {
        let store = MemoryStore::new();
        let (author_id, _) = seed(&store).await;

        let err = CommentService::create_comment(
            &store,
            CreateCommentDto {
                content: "Nice".to_string(),
                post_id: PostId::new(),
                author_id,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_missing_comment_is_not_found() {
        let store = MemoryStore::new();
        let err = CommentService::update_comment(
            &store,
            CommentId::new(),
            UpdateCommentDto {
                content: Some("x".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.error.to_string(), "Comment not found");
    }
}
