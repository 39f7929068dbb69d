use std::sync::Arc;

use service::catalog::CatalogService;
use service::storage::DocumentStore;

/// Shared handler state. The store is opened once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { catalog: CatalogService::new(store) }
    }
}
