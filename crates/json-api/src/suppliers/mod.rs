//! Suppliers

pub(crate) mod handlers;
