//! App Router

use salvo::Router;

use crate::{admin, auth, categories, favorites, products, quotes, suppliers};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler))
                .push(Router::with_path("logout").post(auth::handlers::logout::handler))
                .push(Router::with_path("me").get(auth::handlers::me::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .post(products::handlers::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(products::handlers::get::handler)
                        .put(products::handlers::update::handler)
                        .delete(products::handlers::delete::handler)
                        .push(Router::with_path("status").put(products::handlers::status::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::handlers::index::handler)
                .post(categories::handlers::create::handler)
                .push(Router::with_path("{category}").get(categories::handlers::get::handler))
                .push(
                    Router::with_path("{uuid}")
                        .put(categories::handlers::update::handler)
                        .delete(categories::handlers::delete::handler),
                ),
        )
        .push(
            Router::with_path("suppliers")
                .get(suppliers::handlers::index::handler)
                .push(Router::with_path("{uuid}").get(suppliers::handlers::get::handler)),
        )
        .push(
            Router::with_path("favorites")
                .get(favorites::handlers::index::handler)
                .push(Router::with_path("{uuid}").post(favorites::handlers::toggle::handler)),
        )
        .push(
            Router::with_path("quotes")
                .get(quotes::handlers::index::handler)
                .post(quotes::handlers::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(quotes::handlers::get::handler)
                        .push(Router::with_path("response").post(quotes::handlers::respond::handler))
                        .push(Router::with_path("close").post(quotes::handlers::close::handler)),
                ),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("users")
                        .get(admin::handlers::users::handler)
                        .push(
                            Router::with_path("{uuid}/status")
                                .put(admin::handlers::user_status::handler),
                        ),
                )
                .push(Router::with_path("dashboard").get(admin::handlers::dashboard::handler)),
        )
}
