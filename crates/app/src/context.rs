//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database,
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        favorites::{FavoritesService, PgFavoritesService},
        products::{PgProductsService, ProductsService},
        quotes::{PgQuotesService, QuotesService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub favorites: Arc<dyn FavoritesService>,
    pub quotes: Arc<dyn QuotesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self {
            auth: Arc::new(PgAuthService::new(pool.clone())),
            users: Arc::new(PgUsersService::new(pool.clone())),
            categories: Arc::new(PgCategoriesService::new(pool.clone())),
            products: Arc::new(PgProductsService::new(pool.clone())),
            favorites: Arc::new(PgFavoritesService::new(pool.clone())),
            quotes: Arc::new(PgQuotesService::new(pool)),
        })
    }
}
