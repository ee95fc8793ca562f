// ABOUTME: High-level storage manager for the uls data directory layout.
// ABOUTME: Creates the home and exports directories and wires the key, log, and export stores together.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collection::{CollectionStore, StoreError};
use crate::export::ExportWriter;
use crate::keys::{KEYS_COLLECTION, KeyStore};
use crate::logs::{LOGS_COLLECTION, LogStore};

/// Owns the uls home directory:
///
/// ```text
/// <home>/api_keys.json
/// <home>/logs.json
/// <home>/exports/logs_YYYYMMDD_HHMMSS.csv
/// ```
pub struct StorageManager {
    home: PathBuf,
    keys: KeyStore,
    logs: LogStore,
    exports: ExportWriter,
}

impl StorageManager {
    /// Create the directory layout under `home` and initialize both
    /// collection documents if they are missing.
    pub fn new(home: PathBuf) -> Result<Self, StoreError> {
        let exports_dir = home.join("exports");
        fs::create_dir_all(&exports_dir)?;

        let store = Arc::new(CollectionStore::new(home.clone()));
        for name in [KEYS_COLLECTION, LOGS_COLLECTION] {
            if !store.path_for(name).exists() {
                store.save::<()>(name, &[])?;
            }
        }

        let keys = KeyStore::new(Arc::clone(&store));
        let logs = LogStore::new(store);
        let exports = ExportWriter::new(logs.clone(), exports_dir);

        Ok(Self {
            home,
            keys,
            logs,
            exports,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn exports(&self) -> &ExportWriter {
        &self.exports
    }
}
