//! Quotes Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    products::records::ProductUuid,
    quotes::{
        data::{NewQuoteRecord, QuoteReply},
        records::{QuoteRecord, QuoteResponse, QuoteStatus, QuoteUuid},
    },
    users::records::UserUuid,
};

const INSERT_QUOTE_SQL: &str = include_str!("sql/insert_quote.sql");
const FIND_QUOTE_BY_UUID_SQL: &str = include_str!("sql/find_quote_by_uuid.sql");
const LIST_QUOTES_FOR_REQUESTER_SQL: &str = include_str!("sql/list_quotes_for_requester.sql");
const LIST_QUOTES_FOR_SUPPLIER_SQL: &str = include_str!("sql/list_quotes_for_supplier.sql");
const LIST_ALL_QUOTES_SQL: &str = include_str!("sql/list_all_quotes.sql");
const RESPOND_QUOTE_SQL: &str = include_str!("sql/respond_quote.sql");
const CLOSE_QUOTE_SQL: &str = include_str!("sql/close_quote.sql");
const COUNT_QUOTES_BY_STATUS_SQL: &str = include_str!("sql/count_quotes_by_status.sql");

#[automock]
#[async_trait]
pub trait QuotesRepository: Send + Sync {
    async fn insert_quote(&self, quote: NewQuoteRecord) -> Result<QuoteRecord, sqlx::Error>;

    async fn find_by_uuid(&self, quote: QuoteUuid) -> Result<Option<QuoteRecord>, sqlx::Error>;

    async fn list_for_requester(
        &self,
        user: UserUuid,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error>;

    async fn list_for_supplier(
        &self,
        user: UserUuid,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error>;

    /// Every quote, optionally narrowed to one user's side of the
    /// ledger (either as requester or as supplier).
    async fn list_all(
        &self,
        user: Option<UserUuid>,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error>;

    /// Record the supplier's answer. The write is conditional on the
    /// quote not being closed; `None` means a close landed first.
    async fn respond(
        &self,
        quote: QuoteUuid,
        reply: QuoteReply,
    ) -> Result<Option<QuoteRecord>, sqlx::Error>;

    /// Move a quote to closed. `None` when it was already closed.
    async fn close(&self, quote: QuoteUuid) -> Result<Option<QuoteRecord>, sqlx::Error>;

    async fn count_by_status(&self) -> Result<Vec<(QuoteStatus, i64)>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgQuotesRepository {
    pool: PgPool,
}

impl PgQuotesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuotesRepository for PgQuotesRepository {
    async fn insert_quote(&self, quote: NewQuoteRecord) -> Result<QuoteRecord, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(INSERT_QUOTE_SQL)
            .bind(quote.uuid.into_uuid())
            .bind(quote.product_uuid.into_uuid())
            .bind(quote.requester_uuid.into_uuid())
            .bind(quote.supplier_uuid.into_uuid())
            .bind(&quote.message)
            .bind(quote.quantity)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_uuid(&self, quote: QuoteUuid) -> Result<Option<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(FIND_QUOTE_BY_UUID_SQL)
            .bind(quote.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_for_requester(
        &self,
        user: UserUuid,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(LIST_QUOTES_FOR_REQUESTER_SQL)
            .bind(user.into_uuid())
            .bind(status.map(QuoteStatus::as_str))
            .fetch_all(&self.pool)
            .await
    }

    async fn list_for_supplier(
        &self,
        user: UserUuid,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(LIST_QUOTES_FOR_SUPPLIER_SQL)
            .bind(user.into_uuid())
            .bind(status.map(QuoteStatus::as_str))
            .fetch_all(&self.pool)
            .await
    }

    async fn list_all(
        &self,
        user: Option<UserUuid>,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(LIST_ALL_QUOTES_SQL)
            .bind(user.map(UserUuid::into_uuid))
            .bind(status.map(QuoteStatus::as_str))
            .fetch_all(&self.pool)
            .await
    }

    async fn respond(
        &self,
        quote: QuoteUuid,
        reply: QuoteReply,
    ) -> Result<Option<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(RESPOND_QUOTE_SQL)
            .bind(quote.into_uuid())
            .bind(&reply.message)
            .bind(reply.price_minor)
            .bind(Json(&reply.attachments))
            .fetch_optional(&self.pool)
            .await
    }

    async fn close(&self, quote: QuoteUuid) -> Result<Option<QuoteRecord>, sqlx::Error> {
        query_as::<Postgres, QuoteRecord>(CLOSE_QUOTE_SQL)
            .bind(quote.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn count_by_status(&self) -> Result<Vec<(QuoteStatus, i64)>, sqlx::Error> {
        let rows = sqlx::query(COUNT_QUOTES_BY_STATUS_SQL)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let status = parse_status(row, "status")?;
                let count: i64 = row.try_get("count")?;

                Ok((status, count))
            })
            .collect()
    }
}

fn parse_status(row: &PgRow, column: &str) -> Result<QuoteStatus, sqlx::Error> {
    row.try_get::<String, _>(column)?
        .parse::<QuoteStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for QuoteRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let response = match row.try_get::<Option<String>, _>("response_message")? {
            Some(message) => Some(QuoteResponse {
                message,
                price_minor: row.try_get("response_price_minor")?,
                attachments: row
                    .try_get::<Json<Vec<String>>, _>("response_attachments")?
                    .0,
                responded_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("responded_at")?
                    .map(SqlxTimestamp::to_jiff)
                    .ok_or_else(|| sqlx::Error::ColumnDecode {
                        index: "responded_at".to_string(),
                        source: "response without a responded_at timestamp".into(),
                    })?,
            }),
            None => None,
        };

        Ok(Self {
            uuid: QuoteUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get::<Uuid, _>("product_uuid")?),
            requester_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("requester_uuid")?),
            supplier_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("supplier_uuid")?),
            message: row.try_get("message")?,
            quantity: row.try_get("quantity")?,
            status: parse_status(row, "status")?,
            response,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
