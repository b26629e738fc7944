//! Quote Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Quote UUID
pub type QuoteUuid = TypedUuid<QuoteRecord>;

/// Lifecycle state of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Waiting for the supplier.
    Pending,
    /// The supplier has answered.
    Responded,
    /// Resolved; no further writes.
    Closed,
}

impl QuoteStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Responded => "responded",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status value is unknown.
#[derive(Debug, thiserror::Error)]
#[error("unknown quote status value")]
pub struct UnknownQuoteStatus;

impl FromStr for QuoteStatus {
    type Err = UnknownQuoteStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "responded" => Ok(Self::Responded),
            "closed" => Ok(Self::Closed),
            _ => Err(UnknownQuoteStatus),
        }
    }
}

/// A supplier's answer to a quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResponse {
    pub message: String,
    pub price_minor: Option<i64>,
    /// Attachment URLs supplied with the answer.
    pub attachments: Vec<String>,
    pub responded_at: Timestamp,
}

/// Quote Record
#[derive(Debug, Clone)]
pub struct QuoteRecord {
    pub uuid: QuoteUuid,
    pub product_uuid: ProductUuid,
    /// The project owner who asked.
    pub requester_uuid: UserUuid,
    /// The supplier the request was addressed to.
    pub supplier_uuid: UserUuid,
    pub message: String,
    pub quantity: Option<i64>,
    pub status: QuoteStatus,
    pub response: Option<QuoteResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
