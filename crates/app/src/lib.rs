//! Shared marketplace domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

mod uuids;

pub use uuids::TypedUuid;
