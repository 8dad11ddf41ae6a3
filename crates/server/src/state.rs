//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::AssertionVerifier;
use crate::store::SharedStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the storage backend,
/// the assertion verifier, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: SharedStore,
    verifier: Arc<dyn AssertionVerifier>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        store: SharedStore,
        verifier: Arc<dyn AssertionVerifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                verifier,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Get a reference to the assertion verifier.
    #[must_use]
    pub fn verifier(&self) -> &Arc<dyn AssertionVerifier> {
        &self.inner.verifier
    }
}
