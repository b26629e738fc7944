//! Admin User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry_app::domain::users::{data::UserFilter, records::Role};

use crate::{
    auth::UserResponse,
    extensions::*,
    state::State,
    users::errors::into_status_error,
};

/// Admin Users Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    /// The matching user accounts
    pub users: Vec<UserResponse>,
}

/// Admin User Index Handler
///
/// Lists user accounts, newest first. Admins only.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The matching users"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    role: QueryParam<String, false>,
    active: QueryParam<bool, false>,
    search: QueryParam<String, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let role = role
        .into_inner()
        .map(|r| r.parse::<Role>())
        .transpose()
        .or_400("Unknown role")?;

    let filter = UserFilter {
        role,
        active: active.into_inner(),
        search: search.into_inner(),
        limit: limit.into_inner(),
    };

    let users = state
        .app
        .users
        .list_users(&actor, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
