//! State

use std::sync::Arc;

use tradein::tradein_box::SessionStore;
use tradein_app::context::AppContext;

/// Shared per-process server state.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Session-keyed trade-in boxes; lost on restart.
    pub(crate) boxes: SessionStore,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, boxes: SessionStore) -> Self {
        Self { app, boxes }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, boxes: SessionStore) -> Arc<Self> {
        Arc::new(Self::new(app, boxes))
    }
}
