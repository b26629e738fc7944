//! Update Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Update Product Request
///
/// Full replacement of the listing. `expected_version` is the version
/// the client last read; a mismatch is answered with 409.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub category_uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub expected_version: i64,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            category_uuid: request.category_uuid.into(),
            name: request.name,
            description: request.description,
            price_minor: request.price_minor,
            unit: request.unit,
            location: request.location,
            images: request.images,
            attributes: request.attributes,
            expected_version: request.expected_version,
        }
    }
}

/// Update Product Handler
///
/// Edits a listing. The owning supplier or an admin; a supplier edit
/// takes the listing off the public catalog until re-approval.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Listing updated"),
        (status_code = StatusCode::CONFLICT, description = "Listing was modified concurrently"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner or an admin"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let product = state
        .app
        .products
        .update_product(&actor, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
