//! Favorite Handlers

pub(crate) mod index;
pub(crate) mod toggle;
