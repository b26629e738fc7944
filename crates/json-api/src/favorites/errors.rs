//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::Forbidden => {
            StatusError::forbidden().brief("Only project owners keep favorites")
        }
        FavoritesServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        FavoritesServiceError::Sql(source) => {
            error!("failed to query favorite storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
