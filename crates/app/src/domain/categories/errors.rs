//! Categories service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("a category with this name already exists")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("invalid category data: {0}")]
    Validation(&'static str),

    #[error("category still has products")]
    InUse,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CategoriesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InUse,
            _ => Self::Sql(error),
        }
    }
}
