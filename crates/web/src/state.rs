use std::sync::Arc;

use funlist_scoring::{
    repository::{MemoryScoreStore, ScoreStore},
    services::{DeferredScoreEngine, ScoreEngine},
};

/// Shared handles for the score handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreStore>,
    pub engine: Arc<dyn ScoreEngine>,
}

impl AppState {
    pub fn new(store: Arc<dyn ScoreStore>, engine: Arc<dyn ScoreEngine>) -> Self {
        Self { store, engine }
    }

    /// In-memory store with the deferred engine
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryScoreStore::new()),
            Arc::new(DeferredScoreEngine),
        )
    }
}
