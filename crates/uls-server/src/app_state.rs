// ABOUTME: Shared application state for the uls HTTP server.
// ABOUTME: Wraps the StorageManager so handlers reach the key, log, and export stores.

use std::path::PathBuf;
use std::sync::Arc;

use uls_store::{StorageManager, StoreError};

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub storage: StorageManager,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(storage: StorageManager) -> Self {
        Self { storage }
    }

    /// Lay out (or reopen) the data directory at `home`.
    pub fn open(home: PathBuf) -> Result<Self, StoreError> {
        Ok(Self::new(StorageManager::new(home)?))
    }
}
