//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry_app::domain::users::{data::Registration, records::Role};

use crate::{
    auth::UserResponse, extensions::*, state::State, users::errors::into_status_error,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Requested role: project_owner or supplier
    pub role: String,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}

/// Register Handler
///
/// Creates a project owner or supplier account. Supplier accounts
/// start inactive and wait for admin approval.
#[endpoint(
    tags("auth"),
    summary = "Register Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let role = request
        .role
        .parse::<Role>()
        .or_400("unknown role, expected project_owner or supplier")?;

    let user = state
        .app
        .users
        .register(Registration {
            email: request.email,
            password: request.password,
            role,
            name: request.name,
            company: request.company,
            phone: request.phone,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
