//! Quote Handlers

pub(crate) mod close;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod respond;
