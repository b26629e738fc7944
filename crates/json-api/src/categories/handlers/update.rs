//! Update Category Handler

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

use quarry_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{AttributeSpecBody, CategoryResponse, errors::into_status_error, into_specs},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSpecBody>,
}

/// Update Category Handler
///
/// Replaces a category's name, description, and attribute schema.
/// Admin only. The slug follows the name on rename.
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::CONFLICT, description = "Name already taken"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    let category = state
        .app
        .categories
        .update_category(
            &actor,
            uuid.into_inner().into(),
            CategoryUpdate {
                name: request.name,
                description: request.description,
                attributes: into_specs(request.attributes)?,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        access::Actor,
        categories::{CategoriesServiceError, MockCategoriesService, records::CategoryUuid},
        users::records::Role,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, make_category, test_actor};

    use super::*;

    fn make_service(categories: MockCategoriesService, actor: Actor) -> Service {
        let mut context = TestContext::strict();
        context.categories = categories;

        authed_service(
            context,
            actor,
            Router::with_path("categories/{uuid}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_renames_the_category() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(move |actor, u, update| {
                actor.role == Role::Admin && *u == uuid && update.name == "Structural Timber"
            })
            .return_once(move |_, u, update| {
                let mut record = make_category(u);
                record.name = update.name;
                record.slug = "structural-timber".to_string();
                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/categories/{uuid}"))
            .json(&json!({ "name": "Structural Timber" }))
            .send(&make_service(categories, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(body.slug, "structural-timber");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/categories/{uuid}"))
            .json(&json!({ "name": "Structural Timber" }))
            .send(&make_service(categories, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
