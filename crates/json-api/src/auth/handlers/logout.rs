//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    /// Whether a live session was revoked by this call
    pub revoked: bool,
}

/// Logout Handler
///
/// Revokes the session behind the presented bearer token. Revoking an
/// already revoked session is not an error.
#[endpoint(
    tags("auth"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    // The middleware has already authenticated this token; it is read
    // again here because revocation needs the raw value.
    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))?;

    let revoked = state
        .app
        .auth
        .revoke_bearer(token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LogoutResponse { revoked }))
}
