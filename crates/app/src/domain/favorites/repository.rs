//! Favorites Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, query, query_as, query_scalar};

use crate::domain::{
    products::records::{ProductRecord, ProductUuid},
    users::records::UserUuid,
};

const INSERT_FAVORITE_SQL: &str = include_str!("sql/insert_favorite.sql");
const DELETE_FAVORITE_SQL: &str = include_str!("sql/delete_favorite.sql");
const FAVORITE_EXISTS_SQL: &str = include_str!("sql/favorite_exists.sql");
const LIST_FAVORITE_PRODUCTS_SQL: &str = include_str!("sql/list_favorite_products.sql");

#[automock]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Insert a favorite. Surfaces the unique violation as a plain
    /// `sqlx::Error` so the service can decide what a race means.
    async fn insert_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error>;

    /// Remove a favorite. Returns `true` if one existed.
    async fn delete_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error>;

    async fn favorite_exists(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error>;

    /// Products the user has favorited, newest favorite first.
    async fn list_favorite_products(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgFavoritesRepository {
    pool: PgPool,
}

impl PgFavoritesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoritesRepository for PgFavoritesRepository {
    async fn insert_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_favorite(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let result = query(DELETE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn favorite_exists(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(FAVORITE_EXISTS_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn list_favorite_products(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_FAVORITE_PRODUCTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}
