//! Quote Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::quotes::QuotesServiceError;

pub(crate) fn into_status_error(error: QuotesServiceError) -> StatusError {
    match error {
        QuotesServiceError::NotFound => StatusError::not_found().brief("Quote not found"),
        QuotesServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted for this account")
        }
        QuotesServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        QuotesServiceError::Conflict => {
            StatusError::conflict().brief("Quote is closed")
        }
        QuotesServiceError::Sql(source) => {
            error!("failed to query quote storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
