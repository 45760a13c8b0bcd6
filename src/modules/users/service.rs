use quill_core::{AppError, PasswordHasher};
use quill_db::{DbError, NewUser, UserChanges, UserRepository};
use quill_models::{CreateUserDto, Email, MessageResponse, UpdateUserDto, User, UserId};
use tracing::instrument;

pub struct UserService;

/// Duplicate emails surface as a conflict rather than a generic validation error.
fn map_user_error(err: DbError) -> AppError {
    if err.is_unique_violation() {
        return AppError::email_already_exists();
    }
    err.for_resource("User")
}

impl UserService {
    #[instrument(skip(repo, hasher, dto), fields(email = %dto.email))]
    pub async fn create_user(
        repo: &dyn UserRepository,
        hasher: &dyn PasswordHasher,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let email = Email::new(dto.email).map_err(AppError::bad_request)?;
        let password_hash = hasher.hash(&dto.password)?;

        repo.create(NewUser {
            name: dto.name,
            email,
            password_hash,
        })
        .await
        .map_err(map_user_error)
    }

    #[instrument(skip(repo))]
    pub async fn list_users(repo: &dyn UserRepository) -> Result<Vec<User>, AppError> {
        Ok(repo.find_many().await?)
    }

    #[instrument(skip(repo))]
    pub async fn get_user(repo: &dyn UserRepository, id: UserId) -> Result<User, AppError> {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound.for_resource("User"))
    }

    /// Applies only the supplied fields; a new password is hashed first.
    #[instrument(skip(repo, hasher, dto))]
    pub async fn update_user(
        repo: &dyn UserRepository,
        hasher: &dyn PasswordHasher,
        id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let email = dto
            .email
            .map(Email::new)
            .transpose()
            .map_err(AppError::bad_request)?;
        let password_hash = dto
            .password
            .as_deref()
            .map(|p| hasher.hash(p))
            .transpose()?;

        repo.update(
            id,
            UserChanges {
                name: dto.name,
                email,
                password_hash,
            },
        )
        .await
        .map_err(map_user_error)
    }

    #[instrument(skip(repo))]
    pub async fn delete_user(
        repo: &dyn UserRepository,
        id: UserId,
    ) -> Result<MessageResponse, AppError> {
        repo.delete(id).await.map_err(map_user_error)?;
        Ok(MessageResponse::new("User deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{BcryptHasher, ErrorKind};
    use quill_db::MemoryStore;

    fn create_dto(email: &str) -> CreateUserDto {
        CreateUserDto {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "pass123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let store = MemoryStore::new();
        let hasher = BcryptHasher::new(4);
        UserService::create_user(&store, &hasher, create_dto("ada@x.com"))
            .await
            .unwrap();

        let digest = store.password_hash_of("ada@x.com").await.unwrap();
        assert!(hasher.verify("pass123", &digest));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = MemoryStore::new();
        let hasher = BcryptHasher::new(4);
        let user = UserService::create_user(&store, &hasher, create_dto("ada@x.com"))
            .await
            .unwrap();

        let updated = UserService::update_user(
            &store,
            &hasher,
            user.id,
            UpdateUserDto {
                name: Some("Ada L.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.created_at, user.created_at);
        assert!(updated.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let store = MemoryStore::new();
        let hasher = BcryptHasher::new(4);
        UserService::create_user(&store, &hasher, create_dto("ada@x.com"))
            .await
            .unwrap();
        let other = UserService::create_user(&store, &hasher, create_dto("bob@x.com"))
            .await
            .unwrap();

        let err = UserService::update_user(
            &store,
            &hasher,
            other.id,
            UpdateUserDto {
                email: Some("ada@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmailAlreadyExists);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let hasher = BcryptHasher::new(4);
        let user = UserService::create_user(&store, &hasher, create_dto("ada@x.com"))
            .await
            .unwrap();

        let message = UserService::delete_user(&store, user.id).await.unwrap();
        assert_eq!(message.message, "User deleted successfully");

        let err = UserService::get_user(&store, user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = UserService::delete_user(&store, user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
