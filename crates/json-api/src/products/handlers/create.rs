//! Create Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
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
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            category_uuid: request.category_uuid.into(),
            name: request.name,
            description: request.description,
            price_minor: request.price_minor,
            unit: request.unit,
            location: request.location,
            images: request.images,
            attributes: request.attributes,
        }
    }
}

/// Create Product Handler
///
/// Lists a product. Active suppliers only; the listing starts inactive
/// until an admin approves it.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Listing created"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an active supplier"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let product = state
        .app
        .products
        .create_product(&actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        users::records::Role,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TestContext, anonymous_service, authed_service, make_product, test_actor,
    };

    use super::*;

    fn make_service(products: MockProductsService, role: Role) -> Service {
        let mut context = TestContext::strict();
        context.products = products;

        authed_service(
            context,
            test_actor(role),
            Router::with_path("products").post(handler),
        )
    }

    fn request_body() -> serde_json::Value {
        json!({
            "category_uuid": Uuid::now_v7(),
            "name": "Reclaimed bricks",
            "price_minor": 45_000,
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_location() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|actor, new| actor.role == Role::Supplier && new.name == "Reclaimed bricks")
            .return_once(move |actor, _| {
                let mut record = make_product(uuid, actor.uuid);
                record.active = false;
                Ok(record)
            });

        let mut res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&make_service(products, Role::Supplier))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert!(!body.active, "new listings must start off-catalog");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_by_project_owner_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&make_service(products, Role::ProjectOwner))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_anonymously_returns_401() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&anonymous_service(
                TestContext::strict(),
                Router::with_path("products").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Validation("unknown category")));

        let res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&make_service(products, Role::Supplier))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
