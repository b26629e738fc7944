//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Deletes a category. Admin only; refused while products still
/// reference it.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::CONFLICT, description = "Category still has products"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .categories
        .delete_category(&actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        access::Actor,
        categories::{CategoriesServiceError, MockCategoriesService, records::CategoryUuid},
        users::records::Role,
    };
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, test_actor};

    use super::*;

    fn make_service(categories: MockCategoriesService, actor: Actor) -> Service {
        let mut context = TestContext::strict();
        context.categories = categories;

        authed_service(
            context,
            actor,
            Router::with_path("categories/{uuid}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_succeeds_for_admins() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(move |actor, u| actor.role == Role::Admin && *u == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_of_a_category_in_use_returns_409() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::InUse));

        let res = TestClient::delete(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
