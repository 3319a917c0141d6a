use std::path::PathBuf;
use std::sync::Arc;
use weekplan_core::DocumentStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    /// One store per server so every request serializes on the same lock.
    pub store: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        let store = Arc::new(DocumentStore::open(&root));
        Self { root, store }
    }
}
