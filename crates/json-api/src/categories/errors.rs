//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("A category with this name already exists")
        }
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted for this account")
        }
        CategoriesServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        CategoriesServiceError::InUse => {
            StatusError::conflict().brief("Category still has products")
        }
        CategoriesServiceError::Sql(source) => {
            error!("failed to query category storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
