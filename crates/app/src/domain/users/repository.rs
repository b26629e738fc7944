//! Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::users::{
    data::{NewUserRecord, UserFilter},
    records::{Role, UserRecord, UserUuid},
};

const INSERT_USER_SQL: &str = include_str!("sql/insert_user.sql");
const FIND_USER_BY_UUID_SQL: &str = include_str!("sql/find_user_by_uuid.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const SET_USER_ACTIVE_SQL: &str = include_str!("sql/set_user_active.sql");
const COUNT_USERS_BY_ROLE_SQL: &str = include_str!("sql/count_users_by_role.sql");
const LIST_ACTIVE_SUPPLIERS_SQL: &str = include_str!("sql/list_active_suppliers.sql");

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserRecord, sqlx::Error>;
    async fn find_by_uuid(&self, user: UserUuid) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, sqlx::Error>;
    async fn set_active(
        &self,
        user: UserUuid,
        active: bool,
    ) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn count_by_role(&self) -> Result<Vec<(Role, i64)>, sqlx::Error>;
    async fn list_active_suppliers(&self) -> Result<Vec<UserRecord>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(INSERT_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.name)
            .bind(&user.company)
            .bind(&user.phone)
            .bind(user.active)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_uuid(&self, user: UserUuid) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_UUID_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(filter.role.map(Role::as_str))
            .bind(filter.active)
            .bind(filter.search)
            .bind(filter.limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn set_active(
        &self,
        user: UserUuid,
        active: bool,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ACTIVE_SQL)
            .bind(user.into_uuid())
            .bind(active)
            .fetch_optional(&self.pool)
            .await
    }

    async fn count_by_role(&self) -> Result<Vec<(Role, i64)>, sqlx::Error> {
        let rows = sqlx::query(COUNT_USERS_BY_ROLE_SQL)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let role = parse_role(row, "role")?;
                let count: i64 = row.try_get("count")?;

                Ok((role, count))
            })
            .collect()
    }

    async fn list_active_suppliers(&self) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_ACTIVE_SUPPLIERS_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

pub(crate) fn parse_role(row: &PgRow, column: &str) -> Result<Role, sqlx::Error> {
    row.try_get::<String, _>(column)?
        .parse::<Role>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: parse_role(row, "role")?,
            name: row.try_get("name")?,
            company: row.try_get("company")?,
            phone: row.try_get("phone")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
