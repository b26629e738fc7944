//! Admin Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Count of users holding one role.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// Count of quotes in one lifecycle state.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteStatusCount {
    pub status: String,
    pub count: i64,
}

/// Product totals for the dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductTotals {
    pub total: i64,
    pub active: i64,
}

/// Dashboard Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    /// Users per role
    pub users: Vec<RoleCount>,

    /// Product totals
    pub products: ProductTotals,

    /// Quotes per lifecycle state
    pub quotes: Vec<QuoteStatusCount>,

    /// Number of categories
    pub categories: i64,
}

/// Admin Dashboard Handler
///
/// Aggregate marketplace counts. Admins only.
#[endpoint(
    tags("admin"),
    summary = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Marketplace counts"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let users = state
        .app
        .users
        .user_counts(&actor)
        .await
        .map_err(crate::users::errors::into_status_error)?;

    let products = state
        .app
        .products
        .product_counts(&actor)
        .await
        .map_err(crate::products::errors::into_status_error)?;

    let quotes = state
        .app
        .quotes
        .quote_counts(&actor)
        .await
        .map_err(crate::quotes::errors::into_status_error)?;

    let categories = state
        .app
        .categories
        .category_count(&actor)
        .await
        .map_err(crate::categories::errors::into_status_error)?;

    Ok(Json(DashboardResponse {
        users: users
            .into_iter()
            .map(|(role, count)| RoleCount {
                role: role.to_string(),
                count,
            })
            .collect(),
        products: ProductTotals {
            total: products.total,
            active: products.active,
        },
        quotes: quotes
            .into_iter()
            .map(|(status, count)| QuoteStatusCount {
                status: status.to_string(),
                count,
            })
            .collect(),
        categories,
    }))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        categories::MockCategoriesService,
        products::{MockProductsService, data::ProductCounts},
        quotes::{MockQuotesService, records::QuoteStatus},
        users::{MockUsersService, UsersServiceError, records::Role},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, test_actor};

    use super::*;

    #[tokio::test]
    async fn test_dashboard_aggregates_all_four_counts() -> TestResult {
        let actor = test_actor(Role::Admin);

        let mut users = MockUsersService::new();
        users
            .expect_user_counts()
            .once()
            .return_once(|_| Ok(vec![(Role::ProjectOwner, 12), (Role::Supplier, 4)]));

        let mut products = MockProductsService::new();
        products
            .expect_product_counts()
            .once()
            .return_once(|_| Ok(ProductCounts { total: 30, active: 25 }));

        let mut quotes = MockQuotesService::new();
        quotes
            .expect_quote_counts()
            .once()
            .return_once(|_| Ok(vec![(QuoteStatus::Pending, 7), (QuoteStatus::Closed, 2)]));

        let mut categories = MockCategoriesService::new();
        categories.expect_category_count().once().return_once(|_| Ok(5));

        let mut context = TestContext::strict();
        context.users = users;
        context.products = products;
        context.quotes = quotes;
        context.categories = categories;

        let response: DashboardResponse = TestClient::get("http://example.com/admin/dashboard")
            .send(&authed_service(
                context,
                actor,
                Router::with_path("admin/dashboard").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.users.len(), 2);
        assert_eq!(response.users[0].role, "project_owner");
        assert_eq!(response.products.total, 30);
        assert_eq!(response.products.active, 25);
        assert_eq!(response.quotes[0].status, "pending");
        assert_eq!(response.categories, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_by_a_non_admin_returns_403() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_user_counts()
            .once()
            .return_once(|_| Err(UsersServiceError::Forbidden));

        let mut context = TestContext::strict();
        context.users = users;

        let res = TestClient::get("http://example.com/admin/dashboard")
            .send(&authed_service(
                context,
                test_actor(Role::Supplier),
                Router::with_path("admin/dashboard").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
