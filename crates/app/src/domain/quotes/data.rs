//! Quotes Data

use crate::domain::{
    products::records::ProductUuid,
    quotes::records::{QuoteStatus, QuoteUuid},
    users::records::UserUuid,
};

/// Quote request payload from a project owner. The supplier is named
/// by the caller, matching the product page they came from.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub product_uuid: ProductUuid,
    pub supplier_uuid: UserUuid,
    pub message: String,
    pub quantity: Option<i64>,
}

/// Persistence payload with the requester resolved.
#[derive(Debug, Clone)]
pub struct NewQuoteRecord {
    pub uuid: QuoteUuid,
    pub product_uuid: ProductUuid,
    pub requester_uuid: UserUuid,
    pub supplier_uuid: UserUuid,
    pub message: String,
    pub quantity: Option<i64>,
}

/// Narrowing for quote listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    /// Restrict an admin listing to quotes where this user is a party.
    /// Ignored for non-admin callers, who only ever see their own.
    pub user: Option<UserUuid>,
}

/// A supplier's answer.
#[derive(Debug, Clone)]
pub struct QuoteReply {
    pub message: String,
    pub price_minor: Option<i64>,
    pub attachments: Vec<String>,
}
