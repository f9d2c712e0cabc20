use std::sync::RwLock;

use crate::{
    config_loader::AppConfig,
    dataset::MovieRecord,
    errors::{ReelError, ReelResult},
    feedback::FeedbackStore,
    model::{FeedForwardNet, PreferenceModel},
};

/// Shared process state, injected into the router instead of living in
/// file-scope globals so handlers are testable without a running server.
pub struct AppState {
    pub config: AppConfig,
    /// `None` when the CSV failed to load; dependent routes report this
    /// explicitly instead of crashing at request time.
    dataset: Option<Vec<MovieRecord>>,
    pub feedback: RwLock<FeedbackStore>,
    pub model: RwLock<Box<dyn PreferenceModel + Send + Sync>>,
}

impl AppState {
    pub fn new(config: AppConfig, dataset: Option<Vec<MovieRecord>>) -> Self {
        Self {
            config,
            dataset,
            feedback: RwLock::new(FeedbackStore::new()),
            model: RwLock::new(Box::new(FeedForwardNet::new())),
        }
    }

    pub fn dataset(&self) -> ReelResult<&[MovieRecord]> {
        self.dataset
            .as_deref()
            .ok_or_else(|| ReelError::not_ready("movie dataset"))
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }
}
