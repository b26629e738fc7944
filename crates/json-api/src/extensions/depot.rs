//! Depot helper extensions.

use std::any::Any;

use quarry_app::domain::access::Actor;
use salvo::prelude::{Depot, StatusError};

/// Depot key the auth middleware stores the caller identity under.
const ACTOR_KEY: &str = "quarry.actor";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The authenticated caller, if the request carried a valid token.
    fn maybe_actor(&self) -> Option<Actor>;

    /// The authenticated caller, or 401 for anonymous requests.
    fn actor_or_401(&self) -> Result<Actor, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_KEY, actor);
    }

    fn maybe_actor(&self) -> Option<Actor> {
        self.get::<Actor>(ACTOR_KEY).ok().copied()
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.maybe_actor()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
