//! Favorites service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesServiceError {
    #[error("only project owners keep favorites")]
    Forbidden,

    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FavoritesServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::ProductNotFound,
            error => Self::Sql(error),
        }
    }
}
