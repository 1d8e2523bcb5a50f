//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tradein::{roles::Actor, tradein_box::SessionId};

const ACTOR_KEY: &str = "tradein.actor";
const SESSION_KEY: &str = "tradein.session";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The authenticated caller, set by the bearer auth middleware.
    fn actor_or_401(&self) -> Result<Actor, StatusError>;

    fn insert_session(&mut self, session: SessionId);

    /// The browsing session, set by the session middleware.
    fn session_or_400(&self) -> Result<SessionId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_KEY, actor);
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.get::<Actor>(ACTOR_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }

    fn insert_session(&mut self, session: SessionId) {
        self.insert(SESSION_KEY, session);
    }

    fn session_or_400(&self) -> Result<SessionId, StatusError> {
        self.get::<SessionId>(SESSION_KEY)
            .copied()
            .map_err(|_missing| StatusError::bad_request().brief("Missing X-Session-Id header"))
    }
}
