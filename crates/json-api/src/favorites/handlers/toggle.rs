//! Toggle Favorite Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Favorite Toggled Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoriteToggledResponse {
    /// The new state: true when the product is now favorited
    pub favorited: bool,
}

/// Toggle Favorite Handler
///
/// Flips the favorite state of a product for the caller.
#[endpoint(
    tags("favorites"),
    summary = "Toggle Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Favorite state flipped"),
        (status_code = StatusCode::FORBIDDEN, description = "Project owners only"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<FavoriteToggledResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let favorited = state
        .app
        .favorites
        .toggle_favorite(&actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoriteToggledResponse { favorited }))
}
