//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::{ToSchema, extract::PathParam}, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::ProductFilter;

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    products::{self, ProductResponse},
    state::State,
};

/// Category Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDetailResponse {
    /// The category itself
    pub category: CategoryResponse,

    /// First page of the category's listings visible to the caller
    pub products: Vec<ProductResponse>,
}

/// Get Category Handler
///
/// Returns a category by UUID or slug, with the first page of its
/// listings. Public.
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "The category and its listings"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.maybe_actor();
    let category = category.into_inner();

    // Slugs never parse as UUIDs, so the two namespaces cannot collide.
    let record = match Uuid::parse_str(&category) {
        Ok(uuid) => state.app.categories.get_category(uuid.into()).await,
        Err(_) => state.app.categories.get_category_by_slug(&category).await,
    }
    .map_err(into_status_error)?;

    let filter = ProductFilter {
        category: Some(record.uuid),
        ..ProductFilter::default()
    };

    let page = state
        .app
        .products
        .list_products(actor.as_ref(), filter)
        .await
        .map_err(products::errors::into_status_error)?;

    Ok(Json(CategoryDetailResponse {
        category: record.into(),
        products: page.products.into_iter().map(Into::into).collect(),
    }))
}
