//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry_app::auth::Credentials;

use crate::{
    auth::{UserResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for subsequent requests. Shown once, never stored.
    pub token: String,

    /// The authenticated account
    pub user: UserResponse,
}

/// Login Handler
///
/// Verifies credentials and issues a session token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Account inactive"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .auth
        .login(Credentials {
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        user: issued.user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use quarry_app::auth::{
        AuthServiceError, IssuedSession, MockAuthService, SessionRecord, SessionTokenVersion,
        SessionUuid,
    };
    use quarry_app::domain::users::records::Role;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, anonymous_service, make_user};

    use super::*;

    fn issued_session() -> IssuedSession {
        let user = make_user(Role::ProjectOwner, true);

        IssuedSession {
            token: "qy_v1_test.token".to_string(),
            session: SessionRecord {
                uuid: SessionUuid::new(),
                user_uuid: user.uuid,
                version: SessionTokenVersion::V1,
                token_hash: "digest".to_string(),
                created_at: Timestamp::UNIX_EPOCH,
                expires_at: Timestamp::UNIX_EPOCH,
                revoked_at: None,
            },
            user,
        }
    }

    fn make_service(auth: MockAuthService) -> Service {
        let mut context = TestContext::strict();
        context.auth = auth;

        anonymous_service(context, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "pat@example.com" && credentials.password == "owner password"
            })
            .return_once(|_| Ok(issued_session()));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "pat@example.com", "password": "owner password" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(body.token, "qy_v1_test.token");
        assert_eq!(body.user.email, "pat@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "pat@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_with_inactive_account_returns_403() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::AccountInactive));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "pat@example.com", "password": "supplier password" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
