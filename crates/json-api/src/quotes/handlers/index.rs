//! Quote Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::quotes::{data::QuoteFilter, records::QuoteStatus};

use crate::{
    extensions::*,
    quotes::{QuoteResponse, errors::into_status_error},
    state::State,
};

/// Quotes Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuotesResponse {
    /// The caller's side of the quote ledger
    pub quotes: Vec<QuoteResponse>,
}

/// Quote Index Handler
///
/// Returns the caller's quotes: requesters see what they asked,
/// suppliers what they were asked, admins everything. Admins may
/// narrow by `user`; everyone may narrow by `status`.
#[endpoint(
    tags("quotes"),
    summary = "List Quotes",
    security(("bearer_auth" = [])),
    parameters(
        ("status" = Option<String>, Query, description = "Narrow to one lifecycle state"),
        ("user" = Option<Uuid>, Query, description = "Narrow an admin listing to one user's quotes"),
    ),
    responses(
        (status_code = StatusCode::OK, description = "The caller's quotes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown quote status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    user: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<QuotesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let status = status
        .into_inner()
        .map(|s| s.parse::<QuoteStatus>())
        .transpose()
        .or_400("Unknown quote status")?;

    let filter = QuoteFilter {
        status,
        user: user.into_inner().map(Into::into),
    };

    let quotes = state
        .app
        .quotes
        .list_quotes(&actor, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(QuotesResponse {
        quotes: quotes.into_iter().map(Into::into).collect(),
    }))
}
