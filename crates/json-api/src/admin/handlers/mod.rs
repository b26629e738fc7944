//! Admin Handlers

pub(crate) mod dashboard;
pub(crate) mod user_status;
pub(crate) mod users;
