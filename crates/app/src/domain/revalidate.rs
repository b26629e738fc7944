//! Cache revalidation hook.
//!
//! Mutations that change publicly cached pages notify a [`Revalidator`]
//! with the affected path. The hook is fire and forget; a failing or
//! missing revalidation never fails the mutation that triggered it.

use tracing::debug;

pub trait Revalidator: Send + Sync {
    fn revalidate(&self, path: &str);
}

/// Records revalidated paths in the log. The default in deployments
/// without an edge cache in front of the API.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRevalidator;

impl Revalidator for LogRevalidator {
    fn revalidate(&self, path: &str) {
        debug!(path, "revalidate");
    }
}

/// Drops revalidations entirely. Used in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

impl Revalidator for NoopRevalidator {
    fn revalidate(&self, _path: &str) {}
}
