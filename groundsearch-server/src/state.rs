//! Application State
//!
//! Holds the search service and the effective configuration.

use std::sync::Arc;

use groundsearch_core::SearchService;
use groundsearch_types::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub service: SearchService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(service: SearchService, config: AppConfig) -> Self {
        Self { inner: Arc::new(AppStateInner { service, config }) }
    }

    pub fn service(&self) -> &SearchService {
        &self.inner.service
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn session_count(&self) -> usize {
        self.inner.service.sessions().len()
    }
}
