//! Auth repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, NewSessionRecord, SessionRecord, SessionUuid},
    },
    domain::users::{parse_role, records::UserUuid},
};

const INSERT_SESSION_SQL: &str = include_str!("sql/insert_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn insert_session(
        &self,
        session: NewSessionRecord,
    ) -> Result<SessionRecord, sqlx::Error>;

    /// Find a session that has not been revoked or expired, joined with
    /// its owning user.
    async fn find_active_session(
        &self,
        session: SessionUuid,
    ) -> Result<Option<ActiveSession>, sqlx::Error>;

    /// Revoke a session. Returns `true` if the session was active.
    async fn revoke_session(&self, session: SessionUuid) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn insert_session(
        &self,
        session: NewSessionRecord,
    ) -> Result<SessionRecord, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(INSERT_SESSION_SQL)
            .bind(session.uuid.into_uuid())
            .bind(session.user_uuid.into_uuid())
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(SqlxTimestamp::from(session.expires_at))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_active_session(
        &self,
        session: SessionUuid,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn revoke_session(&self, session: SessionUuid) -> Result<bool, sqlx::Error> {
        let result = query(REVOKE_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_version(row: &PgRow, column: &str) -> Result<SessionTokenVersion, sqlx::Error> {
    SessionTokenVersion::try_from(row.try_get::<i16, _>(column)?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("user_uuid")?),
            version: parse_version(row, "version")?,
            token_hash: row.try_get("token_hash")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            session_uuid: SessionUuid::from_uuid(row.try_get::<Uuid, _>("session_uuid")?),
            version: parse_version(row, "version")?,
            token_hash: row.try_get("token_hash")?,
            user_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("user_uuid")?),
            role: parse_role(row, "role")?,
            active: row.try_get("active")?,
        })
    }
}
