//! Quote response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::quotes::records::{QuoteRecord, QuoteResponse as QuoteAnswer};

/// A supplier's answer to a quote request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteAnswerBody {
    /// The supplier's message
    pub message: String,

    /// Offered price in minor currency units, if quoted
    pub price_minor: Option<i64>,

    /// Attachment URLs supplied with the answer
    pub attachments: Vec<String>,

    /// When the supplier answered
    pub responded_at: String,
}

impl From<QuoteAnswer> for QuoteAnswerBody {
    fn from(answer: QuoteAnswer) -> Self {
        QuoteAnswerBody {
            message: answer.message,
            price_minor: answer.price_minor,
            attachments: answer.attachments,
            responded_at: answer.responded_at.to_string(),
        }
    }
}

/// One quote request between a project owner and a supplier.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    /// The unique identifier of the quote
    pub uuid: Uuid,

    /// The product the request is about
    pub product_uuid: Uuid,

    /// The project owner who asked
    pub requester_uuid: Uuid,

    /// The supplier the request was addressed to
    pub supplier_uuid: Uuid,

    /// The request message
    pub message: String,

    /// Requested quantity, if given
    pub quantity: Option<i64>,

    /// Lifecycle state: pending, responded, or closed
    pub status: String,

    /// The supplier's answer, once given
    pub response: Option<QuoteAnswerBody>,

    /// The date and time the quote was requested
    pub created_at: String,

    /// The date and time the quote was last updated
    pub updated_at: String,
}

impl From<QuoteRecord> for QuoteResponse {
    fn from(quote: QuoteRecord) -> Self {
        QuoteResponse {
            uuid: quote.uuid.into(),
            product_uuid: quote.product_uuid.into(),
            requester_uuid: quote.requester_uuid.into(),
            supplier_uuid: quote.supplier_uuid.into(),
            message: quote.message,
            quantity: quote.quantity,
            status: quote.status.to_string(),
            response: quote.response.map(Into::into),
            created_at: quote.created_at.to_string(),
            updated_at: quote.updated_at.to_string(),
        }
    }
}
