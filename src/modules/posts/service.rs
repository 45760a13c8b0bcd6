use quill_core::AppError;
use quill_db::{DbError, NewPost, PostChanges, PostRepository};
use quill_models::{
    CreatePostDto, MessageResponse, Post, PostFilterParams, PostId, PostWithRelations,
    UpdatePostDto,
};
use tracing::instrument;

pub struct PostService;

impl PostService {
    /// Fails with a validation error when the author does not exist.
    #[instrument(skip(repo, dto), fields(author_id = %dto.author_id))]
    pub async fn create_post(
        repo: &dyn PostRepository,
        dto: CreatePostDto,
    ) -> Result<Post, AppError> {
        repo.create(NewPost {
            title: dto.title,
            content: dto.content,
            author_id: dto.author_id,
        })
        .await
        .map_err(|e| e.for_resource("Post"))
    }

    #[instrument(skip(repo))]
    pub async fn list_posts(
        repo: &dyn PostRepository,
        filters: PostFilterParams,
    ) -> Result<Vec<PostWithRelations>, AppError> {
        Ok(repo.find_many(filters.author_id()).await?)
    }

    #[instrument(skip(repo))]
    pub async fn get_post(
        repo: &dyn PostRepository,
        id: PostId,
    ) -> Result<PostWithRelations, AppError> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound.for_resource("Post"))
    }

    #[instrument(skip(repo, dto))]
    pub async fn update_post(
        repo: &dyn PostRepository,
        id: PostId,
        dto: UpdatePostDto,
    ) -> Result<Post, AppError> {
        repo.update(
            id,
            PostChanges {
                title: dto.title,
                content: dto.content,
            },
        )
        .await
        .map_err(|e| e.for_resource("Post"))
    }

    #[instrument(skip(repo))]
    pub async fn delete_post(
        repo: &dyn PostRepository,
        id: PostId,
    ) -> Result<MessageResponse, AppError> {
        repo.delete(id).await.map_err(|e| e.for_resource("Post"))?;
        Ok(MessageResponse::new("Post deleted successfully"))
    }
}
