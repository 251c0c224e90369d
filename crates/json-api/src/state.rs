//! Shared handler state

use std::sync::Arc;

use jiff::Timestamp;
use sillage_app::context::AppContext;

/// Services plus process facts, injected into every request.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) started_at: Timestamp,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started_at: Timestamp::now(),
        })
    }
}
