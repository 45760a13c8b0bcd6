//! Storage errors.
//!
//! Postgres reports constraint failures as generic database errors; they are
//! classified here once so services can match on what went wrong instead of
//! inspecting SQLSTATE codes.

use anyhow::anyhow;
use quill_core::AppError;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,

    /// Carries the violated constraint name when the driver reports it.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Converts into an [`AppError`] whose messages name the resource involved.
    pub fn for_resource(self, resource: &str) -> AppError {
        match self {
            Self::NotFound => AppError::not_found(anyhow!("{} not found", resource)),
            Self::ForeignKeyViolation(_) => AppError::unprocessable(anyhow!(
                "{} references a user or post that does not exist",
                resource
            )),
            other => other.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return Self::NotFound;
        }

        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(constraint);
            }
        }

        Self::Sqlx(err)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => AppError::not_found(anyhow!("Record not found")),
            DbError::ForeignKeyViolation(constraint) => AppError::unprocessable(anyhow!(
                "Referenced record does not exist ({})",
                constraint
            )),
            DbError::UniqueViolation(constraint) => {
                AppError::bad_request(anyhow!("Duplicate value violates {}", constraint))
            }
            DbError::Sqlx(e) => AppError::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::ErrorKind;

    #[test]
    fn test_row_not_found_becomes_not_found() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_for_resource_names_the_resource() {
        let err = DbError::NotFound.for_resource("Post");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.error.to_string(), "Post not found");
    }

    #[test]
    fn test_foreign_key_violation_is_unprocessable() {
        let err = DbError::ForeignKeyViolation("posts_author_id_fkey".to_string())
            .for_resource("Post");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.status.as_u16(), 422);
    }

    #[test]
    fn test_driver_errors_are_internal() {
        let err: AppError = DbError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
