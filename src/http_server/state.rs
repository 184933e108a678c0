//! Shared handler state

use crate::store::StoreAdapter;

use super::config::ServerConfig;

/// State every handler receives. Read-only after startup.
pub struct AppState {
    pub store: StoreAdapter,

    /// Base address for serving URLs, without trailing slash
    pub public_base_url: String,
}

impl AppState {
    pub fn new(store: StoreAdapter, config: &ServerConfig) -> Self {
        Self {
            store,
            public_base_url: config.public_base_url.clone(),
        }
    }
}
