//! Supplier Directory Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::users::records::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Public directory entry for an approved supplier. Contact details
/// stay private; quotes are the channel to reach a supplier.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierResponse {
    /// The unique identifier of the supplier
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Company name, if provided
    pub company: Option<String>,
}

impl From<UserRecord> for SupplierResponse {
    fn from(user: UserRecord) -> Self {
        SupplierResponse {
            uuid: user.uuid.into(),
            name: user.name,
            company: user.company,
        }
    }
}

/// Suppliers Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuppliersResponse {
    /// All approved suppliers
    pub suppliers: Vec<SupplierResponse>,
}

/// Supplier Directory Handler
///
/// Returns all approved suppliers. Public.
#[endpoint(
    tags("suppliers"),
    summary = "List Suppliers",
    responses(
        (status_code = StatusCode::OK, description = "All approved suppliers"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SuppliersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let suppliers = state
        .app
        .users
        .list_suppliers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(SuppliersResponse {
        suppliers: suppliers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::users::{MockUsersService, records::Role};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, anonymous_service, make_user};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        let mut context = TestContext::strict();
        context.users = users;

        anonymous_service(context, Router::with_path("suppliers").get(handler))
    }

    #[tokio::test]
    async fn test_directory_is_readable_anonymously() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_list_suppliers().once().return_once(|| {
            let mut supplier = make_user(Role::Supplier, true);
            supplier.company = Some("Brick & Beam Ltd".to_string());
            Ok(vec![supplier])
        });

        let response: SuppliersResponse = TestClient::get("http://example.com/suppliers")
            .send(&make_service(users))
            .await
            .take_json()
            .await?;

        assert_eq!(response.suppliers.len(), 1);
        assert_eq!(
            response.suppliers[0].company.as_deref(),
            Some("Brick & Beam Ltd")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_directory_entries_do_not_leak_contact_details() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_list_suppliers()
            .once()
            .return_once(|| Ok(vec![make_user(Role::Supplier, true)]));

        let mut res = TestClient::get("http://example.com/suppliers")
            .send(&make_service(users))
            .await;

        let raw = res.take_string().await?;

        assert!(!raw.contains("email"), "directory must not expose emails");
        assert!(!raw.contains("phone"), "directory must not expose phones");

        Ok(())
    }
}
