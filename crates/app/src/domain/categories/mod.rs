//! Categories

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CategoriesServiceError;
pub use repository::{CategoriesRepository, MockCategoriesRepository, PgCategoriesRepository};
pub use service::*;
