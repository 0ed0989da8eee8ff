//! App Context

use std::sync::Arc;

use crate::{
    api::{HttpStorefrontApi, StorefrontApi},
    config::AppConfig,
    storage::{JsonFileStore, KeyValueStore},
};

/// Shared service handles built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn StorefrontApi>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    /// Build the application context from configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api: Arc::new(HttpStorefrontApi::new(config.api_url.clone())),
            store: Arc::new(JsonFileStore::new(config.data_dir.clone())),
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
