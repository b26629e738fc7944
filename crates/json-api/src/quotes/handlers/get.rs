//! Get Quote Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    quotes::{QuoteResponse, errors::into_status_error},
    state::State,
};

/// Get Quote Handler
///
/// Returns a quote. Only the two parties and admins; to anyone else
/// the quote does not exist.
#[endpoint(
    tags("quotes"),
    summary = "Get Quote",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The quote"),
        (status_code = StatusCode::NOT_FOUND, description = "Quote not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let quote = state
        .app
        .quotes
        .get_quote(&actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
