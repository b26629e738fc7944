//! Supplier Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error as product_error},
    state::State,
    suppliers::handlers::index::SupplierResponse,
    users::errors::into_status_error as supplier_error,
};

/// Supplier Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierDetailResponse {
    /// The supplier's public profile
    pub supplier: SupplierResponse,

    /// The supplier's active listings
    pub products: Vec<ProductResponse>,
}

/// Supplier Detail Handler
///
/// Returns one approved supplier's profile together with their active
/// listings. Public; accounts that are not active suppliers read as
/// not found.
#[endpoint(
    tags("suppliers"),
    summary = "Get Supplier",
    responses(
        (status_code = StatusCode::OK, description = "The supplier and their active listings"),
        (status_code = StatusCode::NOT_FOUND, description = "Supplier not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SupplierDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();

    let supplier = state
        .app
        .users
        .get_supplier(uuid.into())
        .await
        .map_err(supplier_error)?;

    // Listings are fetched as the public sees them, so inactive
    // products stay hidden even from the supplier themselves.
    let filter = ProductFilter {
        supplier: Some(uuid.into()),
        ..ProductFilter::default()
    };

    let page = state
        .app
        .products
        .list_products(None, filter)
        .await
        .map_err(product_error)?;

    Ok(Json(SupplierDetailResponse {
        supplier: supplier.into(),
        products: page.products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        products::{MockProductsService, data::ProductPage, records::ProductUuid},
        users::{MockUsersService, UsersServiceError, records::Role},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, anonymous_service, make_product, make_user};

    use super::*;

    fn make_service(users: MockUsersService, products: MockProductsService) -> Service {
        let mut context = TestContext::strict();
        context.users = users;
        context.products = products;

        anonymous_service(context, Router::with_path("suppliers/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_the_supplier_and_their_listings() -> TestResult {
        let supplier = make_user(Role::Supplier, true);
        let uuid = supplier.uuid;

        let mut users = MockUsersService::new();
        users
            .expect_get_supplier()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(supplier));

        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .once()
            .withf(move |viewer, filter| viewer.is_none() && filter.supplier == Some(uuid))
            .return_once(move |_, _| {
                Ok(ProductPage {
                    products: vec![make_product(ProductUuid::new(), uuid)],
                    total: 1,
                    page: 1,
                    limit: 12,
                })
            });

        let mut res = TestClient::get(format!(
            "http://example.com/suppliers/{}",
            uuid.into_uuid()
        ))
        .send(&make_service(users, products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SupplierDetailResponse = res.take_json().await?;

        assert_eq!(body.supplier.uuid, uuid.into_uuid());
        assert_eq!(body.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_an_unapproved_account_returns_404() -> TestResult {
        let mut users = MockUsersService::new();
        users
            .expect_get_supplier()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/suppliers/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(users, MockProductsService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
