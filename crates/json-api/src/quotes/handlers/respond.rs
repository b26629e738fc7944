//! Respond To Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::quotes::data::QuoteReply;

use crate::{
    extensions::*,
    quotes::{QuoteResponse, errors::into_status_error},
    state::State,
};

/// Respond To Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRespondRequest {
    /// The supplier's answer
    pub message: String,

    /// Offered price in minor currency units, if quoted
    pub price_minor: Option<i64>,

    /// Attachment URLs backing the answer
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl From<QuoteRespondRequest> for QuoteReply {
    fn from(request: QuoteRespondRequest) -> Self {
        QuoteReply {
            message: request.message,
            price_minor: request.price_minor,
            attachments: request.attachments,
        }
    }
}

/// Respond To Quote Handler
///
/// Records the addressed supplier's answer on an open quote. A new
/// answer replaces a previously recorded one.
#[endpoint(
    tags("quotes"),
    summary = "Respond To Quote",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The responded quote"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the addressed supplier"),
        (status_code = StatusCode::NOT_FOUND, description = "Quote not found"),
        (status_code = StatusCode::CONFLICT, description = "Quote is closed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<QuoteRespondRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let quote = state
        .app
        .quotes
        .respond_quote(&actor, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
