//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use quarry_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        access::Actor,
        categories::{MockCategoriesService, records::{CategoryRecord, CategoryUuid}},
        favorites::MockFavoritesService,
        products::{MockProductsService, records::{ProductRecord, ProductUuid}},
        quotes::{
            MockQuotesService,
            records::{QuoteRecord, QuoteStatus, QuoteUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

/// All six mocked services, each strict by default: any call a test
/// did not explicitly expect fails it.
pub(crate) struct TestContext {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) favorites: MockFavoritesService,
    pub(crate) quotes: MockQuotesService,
}

impl TestContext {
    pub(crate) fn strict() -> Self {
        let mut auth = MockAuthService::new();
        auth.expect_login().never();
        auth.expect_authenticate_bearer().never();
        auth.expect_revoke_bearer().never();

        let mut users = MockUsersService::new();
        users.expect_register().never();
        users.expect_get_user().never();
        users.expect_list_users().never();
        users.expect_set_user_active().never();
        users.expect_list_suppliers().never();
        users.expect_get_supplier().never();
        users.expect_user_counts().never();

        let mut categories = MockCategoriesService::new();
        categories.expect_list_categories().never();
        categories.expect_get_category().never();
        categories.expect_get_category_by_slug().never();
        categories.expect_create_category().never();
        categories.expect_update_category().never();
        categories.expect_delete_category().never();
        categories.expect_category_count().never();

        let mut products = MockProductsService::new();
        products.expect_list_products().never();
        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_update_product().never();
        products.expect_set_product_active().never();
        products.expect_delete_product().never();
        products.expect_product_counts().never();

        let mut favorites = MockFavoritesService::new();
        favorites.expect_toggle_favorite().never();
        favorites.expect_is_favorited().never();
        favorites.expect_list_favorites().never();

        let mut quotes = MockQuotesService::new();
        quotes.expect_create_quote().never();
        quotes.expect_get_quote().never();
        quotes.expect_list_quotes().never();
        quotes.expect_respond_quote().never();
        quotes.expect_close_quote().never();
        quotes.expect_quote_counts().never();

        Self {
            auth,
            users,
            categories,
            products,
            favorites,
            quotes,
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            favorites: Arc::new(self.favorites),
            quotes: Arc::new(self.quotes),
        }))
    }
}

/// Middleware stand-in for [`crate::auth::middleware::handler`] that
/// injects a fixed caller.
pub(crate) struct InjectActor(pub(crate) Actor);

#[salvo::async_trait]
impl Handler for InjectActor {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_actor(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn test_actor(role: Role) -> Actor {
    Actor {
        uuid: UserUuid::new(),
        role,
        active: true,
    }
}

/// A service with no caller identity; requests arrive anonymous.
pub(crate) fn anonymous_service(context: TestContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(context.into_state()))
            .push(route),
    )
}

/// A service whose requests all carry the given authenticated caller.
pub(crate) fn authed_service(context: TestContext, actor: Actor, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(context.into_state()))
            .hoop(InjectActor(actor))
            .push(route),
    )
}

pub(crate) fn make_user(role: Role, active: bool) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        email: "pat@example.com".to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role,
        name: "Pat".to_string(),
        company: None,
        phone: None,
        active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, supplier: UserUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        supplier_uuid: supplier,
        category_uuid: CategoryUuid::new(),
        name: "Reclaimed bricks".to_string(),
        description: "Pallet of reclaimed red bricks".to_string(),
        price_minor: 45_000,
        unit: Some("pallet".to_string()),
        location: None,
        images: vec![],
        attributes: BTreeMap::new(),
        active: true,
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Timber".to_string(),
        slug: "timber".to_string(),
        description: None,
        attributes: vec![],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_quote(uuid: QuoteUuid, requester: UserUuid, supplier: UserUuid) -> QuoteRecord {
    QuoteRecord {
        uuid,
        product_uuid: ProductUuid::new(),
        requester_uuid: requester,
        supplier_uuid: supplier,
        message: "Is this still available?".to_string(),
        quantity: Some(3),
        status: QuoteStatus::Pending,
        response: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
