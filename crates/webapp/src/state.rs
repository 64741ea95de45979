//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WebAppConfig;
use crate::store::StoreClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the remote
/// store client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebAppConfig,
    store: StoreClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebAppConfig) -> Self {
        let store = StoreClient::new(&config.store);
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the webapp configuration.
    #[must_use]
    pub fn config(&self) -> &WebAppConfig {
        &self.inner.config
    }

    /// Get a reference to the remote store client.
    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }
}
