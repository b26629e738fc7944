//! Favorites Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, favorites::errors::into_status_error, products::ProductResponse, state::State,
};

/// Favorites Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoritesResponse {
    /// The caller's favorited products, visibility applied
    pub products: Vec<ProductResponse>,
}

/// Favorites Index Handler
///
/// Returns the caller's favorited products. A favorite whose listing
/// has since gone off-catalog is omitted, not deleted.
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's favorites"),
        (status_code = StatusCode::FORBIDDEN, description = "Project owners only"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FavoritesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let products = state
        .app
        .favorites
        .list_favorites(&actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoritesResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
