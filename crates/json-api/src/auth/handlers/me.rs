//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::UserResponse, extensions::*, state::State, users::errors::into_status_error,
};

/// Current User Handler
///
/// Returns the authenticated account.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The authenticated account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .get_user(&actor, actor.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
