//! Admin endpoints.

pub(crate) mod handlers;
