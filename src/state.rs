//! Shared application state for all routes.

use crate::store::{Datastore, MemoryStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub pretty_json: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Datastore>, pretty_json: bool) -> Self {
        Self { store, pretty_json }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), true)
    }
}
