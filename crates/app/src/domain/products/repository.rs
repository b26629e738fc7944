//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{
    FromRow, PgPool, Postgres, Row,
    postgres::PgRow,
    query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProductRecord, ProductChanges, ProductCounts, ProductFilter},
        records::{AttributeValues, ProductRecord, ProductUuid},
        visibility::ListingScope,
    },
    users::records::UserUuid,
};

const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");
const FIND_PRODUCT_BY_UUID_SQL: &str = include_str!("sql/find_product_by_uuid.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_PRODUCT_ACTIVE_SQL: &str = include_str!("sql/set_product_active.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const COUNT_PRODUCT_TOTALS_SQL: &str = include_str!("sql/count_product_totals.sql");

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn insert_product(
        &self,
        product: NewProductRecord,
    ) -> Result<ProductRecord, sqlx::Error>;

    async fn find_by_uuid(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error>;

    /// List one page of products inside the viewer's scope.
    async fn list_products(
        &self,
        scope: ListingScope,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error>;

    /// Unpaged count for the same scope and filter as [`list_products`].
    ///
    /// [`list_products`]: ProductsRepository::list_products
    async fn count_products(
        &self,
        scope: ListingScope,
        filter: ProductFilter,
    ) -> Result<i64, sqlx::Error>;

    /// Versioned update. Returns `None` when no row matched the uuid
    /// and expected version.
    async fn update_product(
        &self,
        product: ProductUuid,
        expected_version: i64,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>, sqlx::Error>;

    /// Versioned status flip. Same `None` contract as `update_product`.
    async fn set_active(
        &self,
        product: ProductUuid,
        expected_version: i64,
        active: bool,
    ) -> Result<Option<ProductRecord>, sqlx::Error>;

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, sqlx::Error>;

    async fn count_totals(&self) -> Result<ProductCounts, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn insert_product(
        &self,
        product: NewProductRecord,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(INSERT_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.supplier_uuid.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price_minor)
            .bind(&product.unit)
            .bind(&product.location)
            .bind(Json(&product.images))
            .bind(Json(&product.attributes))
            .bind(product.active)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_uuid(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FIND_PRODUCT_BY_UUID_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_products(
        &self,
        scope: ListingScope,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(scope.includes_all_inactive())
            .bind(scope.owned_by().map(UserUuid::into_uuid))
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.supplier.map(UserUuid::into_uuid))
            .bind(filter.search.as_deref().map(escape_like))
            .bind(filter.min_price_minor)
            .bind(filter.max_price_minor)
            .bind(filter.limit)
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await
    }

    async fn count_products(
        &self,
        scope: ListingScope,
        filter: ProductFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(scope.includes_all_inactive())
            .bind(scope.owned_by().map(UserUuid::into_uuid))
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.supplier.map(UserUuid::into_uuid))
            .bind(filter.search.as_deref().map(escape_like))
            .bind(filter.min_price_minor)
            .bind(filter.max_price_minor)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        expected_version: i64,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(expected_version)
            .bind(changes.category_uuid.into_uuid())
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.price_minor)
            .bind(&changes.unit)
            .bind(&changes.location)
            .bind(Json(&changes.images))
            .bind(Json(&changes.attributes))
            .bind(changes.active)
            .fetch_optional(&self.pool)
            .await
    }

    async fn set_active(
        &self,
        product: ProductUuid,
        expected_version: i64,
        active: bool,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_ACTIVE_SQL)
            .bind(product.into_uuid())
            .bind(expected_version)
            .bind(active)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_totals(&self) -> Result<ProductCounts, sqlx::Error> {
        let row = sqlx::query(COUNT_PRODUCT_TOTALS_SQL)
            .fetch_one(&self.pool)
            .await?;

        Ok(ProductCounts {
            total: row.try_get("total")?,
            active: row.try_get("active")?,
        })
    }
}

/// Escape `ILIKE` metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            supplier_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("supplier_uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get::<Uuid, _>("category_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price_minor: row.try_get("price_minor")?,
            unit: row.try_get("unit")?,
            location: row.try_get("location")?,
            images: row.try_get::<Json<Vec<String>>, _>("images")?.0,
            attributes: row.try_get::<Json<AttributeValues>, _>("attributes")?.0,
            active: row.try_get("active")?,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_terms_match_wildcards_literally() {
        assert_eq!(escape_like("100% oak"), "100\\% oak");
        assert_eq!(escape_like("t_joint"), "t\\_joint");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain bricks"), "plain bricks");
    }
}
