//! Categories

pub(crate) mod errors;
pub(crate) mod handlers;
mod models;

pub(crate) use models::{AttributeSpecBody, CategoryResponse, into_specs};
