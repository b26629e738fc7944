//! Product Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::StatusChange;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Product Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStatusRequest {
    /// Whether the listing should be on the public catalog
    pub active: bool,

    /// The version the client last read
    pub expected_version: i64,
}

/// Product Status Handler
///
/// Approves or suspends a listing. Admin only.
#[endpoint(
    tags("products"),
    summary = "Set Product Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::CONFLICT, description = "Listing was modified concurrently"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<ProductStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    let product = state
        .app
        .products
        .set_product_active(
            &actor,
            StatusChange {
                product: uuid.into_inner().into(),
                active: request.active,
                expected_version: request.expected_version,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        access::Actor,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        users::records::{Role, UserUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, make_product, test_actor};

    use super::*;

    fn make_service(products: MockProductsService, actor: Actor) -> Service {
        let mut context = TestContext::strict();
        context.products = products;

        authed_service(
            context,
            actor,
            Router::with_path("products/{uuid}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_can_approve_a_listing() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_set_product_active()
            .once()
            .withf(move |actor, change| {
                actor.role == Role::Admin
                    && change.product == uuid
                    && change.active
                    && change.expected_version == 1
            })
            .return_once(move |_, change| {
                let mut record = make_product(change.product, UserUuid::new());
                record.active = true;
                record.version = 2;
                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}/status"))
            .json(&json!({ "active": true, "expected_version": 1 }))
            .send(&make_service(products, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert!(body.active);
        assert_eq!(body.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_status_change_returns_403() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_set_product_active()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/products/{uuid}/status"))
            .json(&json!({ "active": true, "expected_version": 1 }))
            .send(&make_service(products, test_actor(Role::Supplier)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_status_change_returns_409() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_set_product_active()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Conflict));

        let res = TestClient::put(format!("http://example.com/products/{uuid}/status"))
            .json(&json!({ "active": false, "expected_version": 4 }))
            .send(&make_service(products, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
