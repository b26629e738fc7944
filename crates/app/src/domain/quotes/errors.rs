//! Quotes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::quotes::lifecycle::QuoteRuleViolation;

#[derive(Debug, Error)]
pub enum QuotesServiceError {
    #[error("quote not found")]
    NotFound,

    #[error("operation not permitted for this actor")]
    Forbidden,

    #[error("invalid quote data: {0}")]
    Validation(&'static str),

    #[error("quote is closed")]
    Conflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for QuotesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => {
                Self::Validation("referenced product or supplier does not exist")
            }
            _ => Self::Sql(error),
        }
    }
}

impl From<QuoteRuleViolation> for QuotesServiceError {
    fn from(violation: QuoteRuleViolation) -> Self {
        match violation {
            QuoteRuleViolation::Forbidden => Self::Forbidden,
            QuoteRuleViolation::Closed => Self::Conflict,
        }
    }
}
