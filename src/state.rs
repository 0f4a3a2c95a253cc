use std::sync::Arc;

use crate::config::Config;
use crate::scoring::{SharedRecommender, StubRecommender};
use crate::store::SharedStore;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub recommender: SharedRecommender,
    pub config: Config,
}

impl AppState {
    /// State with the stub recommender.
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            store,
            recommender: Arc::new(StubRecommender),
            config,
        }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SharedRecommender {
    fn from_ref(state: &AppState) -> Self {
        state.recommender.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
