//! Close Quote Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    quotes::{QuoteResponse, errors::into_status_error},
    state::State,
};

/// Close Quote Handler
///
/// Closes a quote. The requester or an admin may close; closing an
/// already-closed quote is a no-op.
#[endpoint(
    tags("quotes"),
    summary = "Close Quote",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The closed quote"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the requester or an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Quote not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let quote = state
        .app
        .quotes
        .close_quote(&actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}

#[cfg(test)]
mod tests {
    use quarry_app::domain::{
        access::Actor,
        quotes::{
            MockQuotesService, QuotesServiceError,
            records::{QuoteStatus, QuoteUuid},
        },
        users::records::{Role, UserUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestContext, authed_service, make_quote, test_actor};

    use super::*;

    fn make_service(quotes: MockQuotesService, actor: Actor) -> Service {
        let mut context = TestContext::strict();
        context.quotes = quotes;

        authed_service(
            context,
            actor,
            Router::with_path("quotes/{uuid}/close").post(handler),
        )
    }

    #[tokio::test]
    async fn test_close_by_the_requester_succeeds() -> TestResult {
        let actor = test_actor(Role::ProjectOwner);
        let uuid = QuoteUuid::new();

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_close_quote()
            .once()
            .withf(move |caller, u| caller.uuid == actor.uuid && *u == uuid)
            .return_once(move |caller, u| {
                let mut quote = make_quote(u, caller.uuid, UserUuid::new());
                quote.status = QuoteStatus::Closed;
                Ok(quote)
            });

        let mut res = TestClient::post(format!("http://example.com/quotes/{uuid}/close"))
            .send(&make_service(quotes, actor))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: QuoteResponse = res.take_json().await?;

        assert_eq!(body.status, "closed");

        Ok(())
    }

    #[tokio::test]
    async fn test_close_by_the_supplier_returns_403() -> TestResult {
        let uuid = QuoteUuid::new();

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_close_quote()
            .once()
            .return_once(|_, _| Err(QuotesServiceError::Forbidden));

        let res = TestClient::post(format!("http://example.com/quotes/{uuid}/close"))
            .send(&make_service(quotes, test_actor(Role::Supplier)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_close_of_an_unknown_quote_returns_404() -> TestResult {
        let uuid = QuoteUuid::new();

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_close_quote()
            .once()
            .return_once(|_, _| Err(QuotesServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/quotes/{uuid}/close"))
            .send(&make_service(quotes, test_actor(Role::Admin)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
