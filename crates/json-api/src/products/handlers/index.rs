//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// One page of listings
    pub products: Vec<ProductResponse>,

    /// Total matches across all pages
    pub total: i64,

    /// The 1-based page that was returned
    pub page: i64,

    /// The page size that was applied
    pub limit: i64,
}

/// Product Index Handler
///
/// Returns one page of the catalog. Anonymous callers and project
/// owners see active listings; suppliers additionally see their own
/// inactive ones, admins see everything.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of listings"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one parameter per query filter")]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    supplier: QueryParam<Uuid, false>,
    search: QueryParam<String, false>,
    min_price: QueryParam<i64, false>,
    max_price: QueryParam<i64, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.maybe_actor();

    let defaults = ProductFilter::default();
    let filter = ProductFilter {
        category: category.into_inner().map(Into::into),
        supplier: supplier.into_inner().map(Into::into),
        search: search.into_inner(),
        min_price_minor: min_price.into_inner(),
        max_price_minor: max_price.into_inner(),
        page: page.into_inner().unwrap_or(defaults.page),
        limit: limit.into_inner().unwrap_or(defaults.limit),
    };

    let page = state
        .app
        .products
        .list_products(actor.as_ref(), filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}
