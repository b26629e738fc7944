//! Admin User Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserResponse,
    extensions::*,
    state::State,
    users::errors::into_status_error,
};

/// User Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserStatusRequest {
    /// Whether the account may log in
    pub active: bool,
}

/// Admin User Status Handler
///
/// Activates or deactivates an account. Admins only; deactivation
/// also revokes the account's live sessions.
#[endpoint(
    tags("admin"),
    summary = "Set User Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The updated user"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UserStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .set_user_active(&actor, uuid.into_inner().into(), json.into_inner().active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        access::Actor,
        users::{
            MockUsersService, UsersServiceError,
            records::{Role, UserUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, make_user, test_actor};

    use super::*;

    fn make_service(users: MockUsersService, actor: Actor) -> Service {
        let mut context = TestContext::strict();
        context.users = users;

        authed_service(
            context,
            actor,
            Router::with_path("admin/users/{uuid}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_deactivation_returns_the_updated_user() -> TestResult {
        let actor = test_actor(Role::Admin);
        let uuid = UserUuid::new();

        let mut users = MockUsersService::new();

        users
            .expect_set_user_active()
            .once()
            .withf(move |caller, u, active| {
                caller.uuid == actor.uuid && *u == uuid && !active
            })
            .return_once(move |_, u, active| {
                let mut user = make_user(Role::Supplier, active);
                user.uuid = u;
                Ok(user)
            });

        let mut res = TestClient::put(format!("http://example.com/admin/users/{uuid}/status"))
            .json(&json!({ "active": false }))
            .send(&make_service(users, actor))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert!(!body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_change_by_a_non_admin_returns_403() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_set_user_active()
            .once()
            .return_once(|_, _, _| Err(UsersServiceError::Forbidden));

        let res = TestClient::put(format!(
            "http://example.com/admin/users/{}/status",
            UserUuid::new()
        ))
        .json(&json!({ "active": false }))
        .send(&make_service(users, test_actor(Role::ProjectOwner)))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_status_change_for_an_unknown_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_set_user_active()
            .once()
            .return_once(|_, _, _| Err(UsersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/admin/users/{}/status",
            UserUuid::new()
        ))
        .json(&json!({ "active": true }))
        .send(&make_service(users, test_actor(Role::Admin)))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
