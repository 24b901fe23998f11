use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::FeedbackStore;

/// Shared per-process state handed to every handler through the router
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn FeedbackStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn FeedbackStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
