//! Users

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::UsersServiceError;
pub(crate) use repository::parse_role;
pub use repository::{MockUsersRepository, PgUsersRepository, UsersRepository};
pub use service::*;
