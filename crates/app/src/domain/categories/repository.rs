//! Categories Repository

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

use crate::domain::categories::records::{AttributeSpec, CategoryRecord, CategoryUuid};

const INSERT_CATEGORY_SQL: &str = include_str!("sql/insert_category.sql");
const FIND_CATEGORY_BY_UUID_SQL: &str = include_str!("sql/find_category_by_uuid.sql");
const FIND_CATEGORY_BY_SLUG_SQL: &str = include_str!("sql/find_category_by_slug.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const COUNT_CATEGORY_PRODUCTS_SQL: &str = include_str!("sql/count_category_products.sql");
const COUNT_CATEGORIES_SQL: &str = include_str!("sql/count_categories.sql");

#[automock]
#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn insert_category<'a>(
        &self,
        uuid: CategoryUuid,
        name: &str,
        slug: &str,
        description: Option<&'a str>,
        attributes: &[AttributeSpec],
    ) -> Result<CategoryRecord, sqlx::Error>;

    async fn find_by_uuid(
        &self,
        category: CategoryUuid,
    ) -> Result<Option<CategoryRecord>, sqlx::Error>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, sqlx::Error>;

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error>;

    async fn update_category<'a>(
        &self,
        category: CategoryUuid,
        name: &str,
        slug: &str,
        description: Option<&'a str>,
        attributes: &[AttributeSpec],
    ) -> Result<Option<CategoryRecord>, sqlx::Error>;

    async fn delete_category(&self, category: CategoryUuid) -> Result<bool, sqlx::Error>;

    /// Number of products still referencing a category.
    async fn count_products(&self, category: CategoryUuid) -> Result<i64, sqlx::Error>;

    async fn count_categories(&self) -> Result<i64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCategoriesRepository {
    pool: PgPool,
}

impl PgCategoriesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriesRepository for PgCategoriesRepository {
    async fn insert_category<'a>(
        &self,
        uuid: CategoryUuid,
        name: &str,
        slug: &str,
        description: Option<&'a str>,
        attributes: &[AttributeSpec],
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(INSERT_CATEGORY_SQL)
            .bind(uuid.into_uuid())
            .bind(name)
            .bind(slug)
            .bind(description)
            .bind(Json(attributes))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_uuid(
        &self,
        category: CategoryUuid,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(FIND_CATEGORY_BY_UUID_SQL)
            .bind(category.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(FIND_CATEGORY_BY_SLUG_SQL)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_category<'a>(
        &self,
        category: CategoryUuid,
        name: &str,
        slug: &str,
        description: Option<&'a str>,
        attributes: &[AttributeSpec],
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .bind(slug)
            .bind(description)
            .bind(Json(attributes))
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_products(&self, category: CategoryUuid) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATEGORY_PRODUCTS_SQL)
            .bind(category.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn count_categories(&self) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATEGORIES_SQL)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            attributes: row
                .try_get::<Json<Vec<AttributeSpec>>, _>("attributes")?
                .0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
