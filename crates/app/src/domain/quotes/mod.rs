//! Quotes

pub mod data;
pub mod errors;
pub mod lifecycle;
pub mod records;
mod repository;
pub mod service;

pub use errors::QuotesServiceError;
pub use repository::{MockQuotesRepository, PgQuotesRepository, QuotesRepository};
pub use service::*;
