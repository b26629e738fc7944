//! Marketplace Domain Concerns

pub mod access;
pub mod categories;
pub mod favorites;
pub mod products;
pub mod quotes;
pub mod revalidate;
pub mod users;
