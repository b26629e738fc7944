//! Products

pub mod attributes;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod visibility;

pub use errors::ProductsServiceError;
pub use repository::{MockProductsRepository, PgProductsRepository, ProductsRepository};
pub use service::*;
