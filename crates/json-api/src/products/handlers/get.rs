//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use quarry_app::domain::users::records::Role;

use crate::{
    extensions::*,
    favorites,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Get Product Handler
///
/// Returns a single listing behind the same visibility gate as the
/// index: a hidden listing is indistinguishable from a missing one.
/// Project owners also get their favorite flag for the listing.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The listing"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.maybe_actor();

    let product = state
        .app
        .products
        .get_product(actor.as_ref(), uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let mut response = ProductResponse::from(product);

    if let Some(actor) = actor.filter(|a| a.role == Role::ProjectOwner) {
        let favorited = state
            .app
            .favorites
            .is_favorited(&actor, response.uuid.into())
            .await
            .map_err(favorites::errors::into_status_error)?;

        response.is_favorite = Some(favorited);
    }

    Ok(Json(response))
}
