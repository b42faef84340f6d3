//! Shared handler state.

use std::sync::Arc;

use surge_store::RuleStore;

/// State cloned into every request handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub store: Arc<dyn RuleStore>,
}
