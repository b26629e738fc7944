//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted for this account")
        }
        ProductsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::Conflict => {
            StatusError::conflict().brief("Product was modified concurrently")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to query product storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
