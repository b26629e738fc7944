//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::AccountInactive => {
            StatusError::forbidden().brief("Account is inactive or awaiting approval")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid session token"),
        AuthServiceError::PasswordHash => {
            error!("failed to process password hash");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to query session storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
