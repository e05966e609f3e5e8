//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::Analyzer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Analysis service with provider, configuration, and result cache
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }
}
