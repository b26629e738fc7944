//! Quotes Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::{
    access::Actor,
    products::{PgProductsRepository, ProductsRepository, visibility::visible_to},
    quotes::{
        data::{NewQuote, NewQuoteRecord, QuoteFilter, QuoteReply},
        errors::QuotesServiceError,
        lifecycle::{can_view, ensure_can_close, ensure_can_respond},
        records::{QuoteRecord, QuoteStatus, QuoteUuid},
        repository::{PgQuotesRepository, QuotesRepository},
    },
    users::{
        PgUsersRepository, UsersRepository,
        records::Role,
    },
};

#[automock]
#[async_trait]
pub trait QuotesService: Send + Sync {
    /// Ask a supplier about a product. Project owners only.
    async fn create_quote(
        &self,
        actor: &Actor,
        quote: NewQuote,
    ) -> Result<QuoteRecord, QuotesServiceError>;

    /// Read a quote. Only the parties and admins may see it.
    async fn get_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
    ) -> Result<QuoteRecord, QuotesServiceError>;

    /// The actor's side of the quote ledger: requesters see what they
    /// asked, suppliers what they were asked, admins everything. The
    /// filter's user narrowing applies to admin listings only.
    async fn list_quotes(
        &self,
        actor: &Actor,
        filter: QuoteFilter,
    ) -> Result<Vec<QuoteRecord>, QuotesServiceError>;

    /// Answer an open quote. The addressed supplier only; a new answer
    /// replaces the prior one.
    async fn respond_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
        reply: QuoteReply,
    ) -> Result<QuoteRecord, QuotesServiceError>;

    /// Close a quote. The requester or an admin; idempotent.
    async fn close_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
    ) -> Result<QuoteRecord, QuotesServiceError>;

    /// Per-status totals for the admin dashboard. Admin only.
    async fn quote_counts(
        &self,
        actor: &Actor,
    ) -> Result<Vec<(QuoteStatus, i64)>, QuotesServiceError>;
}

pub struct PgQuotesService {
    quotes: Arc<dyn QuotesRepository>,
    products: Arc<dyn ProductsRepository>,
    users: Arc<dyn UsersRepository>,
}

impl PgQuotesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            quotes: Arc::new(PgQuotesRepository::new(pool.clone())),
            products: Arc::new(PgProductsRepository::new(pool.clone())),
            users: Arc::new(PgUsersRepository::new(pool)),
        }
    }

    #[must_use]
    pub fn with_dependencies(
        quotes: Arc<dyn QuotesRepository>,
        products: Arc<dyn ProductsRepository>,
        users: Arc<dyn UsersRepository>,
    ) -> Self {
        Self {
            quotes,
            products,
            users,
        }
    }
}

#[async_trait]
impl QuotesService for PgQuotesService {
    async fn create_quote(
        &self,
        actor: &Actor,
        quote: NewQuote,
    ) -> Result<QuoteRecord, QuotesServiceError> {
        if !actor.has_role(Role::ProjectOwner) || !actor.active {
            return Err(QuotesServiceError::Forbidden);
        }

        if quote.message.trim().is_empty() {
            return Err(QuotesServiceError::Validation("a message is required"));
        }

        if quote.quantity.is_some_and(|quantity| quantity <= 0) {
            return Err(QuotesServiceError::Validation(
                "quantity must be positive",
            ));
        }

        let product = self
            .products
            .find_by_uuid(quote.product_uuid)
            .await?
            .ok_or(QuotesServiceError::Validation("unknown product"))?;

        if !visible_to(product.active, product.supplier_uuid, Some(actor)) {
            return Err(QuotesServiceError::Validation("unknown product"));
        }

        // The addressed supplier must exist and hold the supplier
        // role. The pairing with the product is taken as given from
        // the caller.
        let supplier = self
            .users
            .find_by_uuid(quote.supplier_uuid)
            .await?
            .ok_or(QuotesServiceError::Validation("unknown supplier"))?;

        if supplier.role != Role::Supplier {
            return Err(QuotesServiceError::Validation("unknown supplier"));
        }

        let record = self
            .quotes
            .insert_quote(NewQuoteRecord {
                uuid: QuoteUuid::new(),
                product_uuid: quote.product_uuid,
                requester_uuid: actor.uuid,
                supplier_uuid: quote.supplier_uuid,
                message: quote.message,
                quantity: quote.quantity,
            })
            .await?;

        info!(quote = %record.uuid, product = %record.product_uuid, "quote requested");

        Ok(record)
    }

    async fn get_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
    ) -> Result<QuoteRecord, QuotesServiceError> {
        let record = self
            .quotes
            .find_by_uuid(quote)
            .await?
            .ok_or(QuotesServiceError::NotFound)?;

        // Outsiders cannot learn that the quote exists.
        if !can_view(actor, &record) {
            return Err(QuotesServiceError::NotFound);
        }

        Ok(record)
    }

    async fn list_quotes(
        &self,
        actor: &Actor,
        filter: QuoteFilter,
    ) -> Result<Vec<QuoteRecord>, QuotesServiceError> {
        let quotes = match actor.role {
            Role::Admin => self.quotes.list_all(filter.user, filter.status).await?,
            Role::Supplier => {
                self.quotes
                    .list_for_supplier(actor.uuid, filter.status)
                    .await?
            }
            Role::ProjectOwner => {
                self.quotes
                    .list_for_requester(actor.uuid, filter.status)
                    .await?
            }
        };

        Ok(quotes)
    }

    async fn respond_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
        reply: QuoteReply,
    ) -> Result<QuoteRecord, QuotesServiceError> {
        if reply.message.trim().is_empty() {
            return Err(QuotesServiceError::Validation("a message is required"));
        }

        if reply.price_minor.is_some_and(|price| price < 0) {
            return Err(QuotesServiceError::Validation(
                "price must not be negative",
            ));
        }

        let record = self
            .quotes
            .find_by_uuid(quote)
            .await?
            .ok_or(QuotesServiceError::NotFound)?;

        ensure_can_respond(actor, &record)?;

        // The write re-checks that the quote is still open, so a close
        // that lands between the read above and here surfaces as a
        // conflict.
        self.quotes
            .respond(quote, reply)
            .await?
            .ok_or(QuotesServiceError::Conflict)
    }

    async fn close_quote(
        &self,
        actor: &Actor,
        quote: QuoteUuid,
    ) -> Result<QuoteRecord, QuotesServiceError> {
        let record = self
            .quotes
            .find_by_uuid(quote)
            .await?
            .ok_or(QuotesServiceError::NotFound)?;

        ensure_can_close(actor, &record)?;

        if record.status == QuoteStatus::Closed {
            return Ok(record);
        }

        match self.quotes.close(quote).await? {
            Some(closed) => Ok(closed),
            // Someone closed it first; report the settled state.
            None => self
                .quotes
                .find_by_uuid(quote)
                .await?
                .ok_or(QuotesServiceError::NotFound),
        }
    }

    async fn quote_counts(
        &self,
        actor: &Actor,
    ) -> Result<Vec<(QuoteStatus, i64)>, QuotesServiceError> {
        if !actor.is_admin() {
            return Err(QuotesServiceError::Forbidden);
        }

        Ok(self.quotes.count_by_status().await?)
    }
}
