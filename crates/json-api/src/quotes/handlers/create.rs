//! Create Quote Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::quotes::data::NewQuote;

use crate::{
    extensions::*,
    quotes::{QuoteResponse, errors::into_status_error},
    state::State,
};

/// Create Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateQuoteRequest {
    /// The product the request is about
    pub product_uuid: Uuid,

    /// The supplier to address, from the product page
    pub supplier_uuid: Uuid,

    /// The request message
    pub message: String,

    /// Requested quantity, if known
    pub quantity: Option<i64>,
}

impl From<CreateQuoteRequest> for NewQuote {
    fn from(request: CreateQuoteRequest) -> Self {
        NewQuote {
            product_uuid: request.product_uuid.into(),
            supplier_uuid: request.supplier_uuid.into(),
            message: request.message,
            quantity: request.quantity,
        }
    }
}

/// Create Quote Handler
///
/// Asks a supplier about a product. Active project owners only.
#[endpoint(
    tags("quotes"),
    summary = "Request Quote",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Quote requested"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an active project owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateQuoteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let quote = state
        .app
        .quotes
        .create_quote(&actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/quotes/{}", quote.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(quote.into()))
}
