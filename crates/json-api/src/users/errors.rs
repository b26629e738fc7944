//! User Errors

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("A user with this email already exists")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted for this account")
        }
        UsersServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        UsersServiceError::PasswordHash => {
            error!("failed to hash password");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("failed to query user storage: {source}");

            StatusError::internal_server_error()
        }
    }
}
