use std::sync::Arc;

use dinodir_core::Directory;

/// Shared application state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}
