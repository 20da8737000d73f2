//! Shared application state for all routes.

use std::sync::Arc;

use crate::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
