//! Depot helper extensions.

use std::any::Any;

use glacier_app::auth::Actor;
use salvo::prelude::{Depot, StatusError};

const ACTOR_KEY: &str = "glacier.actor";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// Access to the authenticated actor placed in the depot by the auth
/// middleware.
pub(crate) trait ActorExt {
    fn insert_actor(&mut self, actor: Actor);

    fn actor_or_401(&self) -> Result<Actor, StatusError>;
}

impl ActorExt for Depot {
    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_KEY, actor);
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.get::<Actor>(ACTOR_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
