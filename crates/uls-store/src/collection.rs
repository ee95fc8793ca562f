// ABOUTME: Whole-document JSON collection storage with atomic writes and per-name locking.
// ABOUTME: Reads tolerate missing or corrupt files by yielding an empty collection; writes report failures.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while persisting a collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("collection '{name}' is unreadable, refusing to overwrite it: {source}")]
    Corrupt {
        name: String,
        source: serde_json::Error,
    },

    #[error("lock for collection '{0}' is poisoned")]
    LockPoisoned(String),
}

/// A directory of named collections, each stored as one pretty-printed JSON
/// array in `<root>/<name>.json`.
///
/// Every read-modify-write goes through [`CollectionStore::update`], which
/// holds an exclusive lock for that name across load, mutation and save.
/// Different names never contend with each other.
pub struct CollectionStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CollectionStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Path of the backing document for `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    /// Load the whole collection.
    ///
    /// A missing document is first initialized to an empty array. Any read
    /// or parse failure yields an empty collection; the caller never sees an
    /// error from a read.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        if let Err(e) = self.ensure_document(name) {
            tracing::warn!("failed to initialize collection {}: {}", name, e);
        }
        match self.read_document(name) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("{}; treating as empty", e);
                Vec::new()
            }
        }
    }

    /// Replace the whole collection on disk.
    pub fn save<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        let lock = self.lock_for(name)?;
        let _guard = acquire(&lock, name)?;
        self.write_document(name, items)
    }

    /// Load, mutate and save `name` as one exclusive step.
    ///
    /// The closure's return value is passed back once the save succeeds. If
    /// the save fails, the in-memory mutation is discarded with the error.
    /// A document that exists but cannot be read or parsed is left untouched
    /// and reported as an error, so its contents are never replaced by a
    /// partial view. Use [`CollectionStore::save`] to deliberately replace it.
    pub fn update<T, R, F>(&self, name: &str, f: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let lock = self.lock_for(name)?;
        let _guard = acquire(&lock, name)?;

        let mut items: Vec<T> = self.read_document(name)?;
        let result = f(&mut items);
        self.write_document(name, &items)?;
        Ok(result)
    }

    fn ensure_document(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        if path.exists() {
            return Ok(());
        }

        let lock = self.lock_for(name)?;
        let _guard = acquire(&lock, name)?;
        // A concurrent update may have created it while we waited.
        if !path.exists() {
            self.write_document::<()>(name, &[])?;
        }
        Ok(())
    }

    /// Read and parse the document. A missing document is an empty collection.
    fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let contents = match fs::read_to_string(self.path_for(name)) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    fn lock_for(&self, name: &str) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StoreError::LockPoisoned(name.to_string()))?;
        Ok(Arc::clone(locks.entry(name.to_string()).or_default()))
    }

    /// Atomic write: serialize to `<name>.json.tmp`, fsync, rename over the
    /// target. Callers must hold the lock for `name`.
    fn write_document<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let final_path = self.path_for(name);
        let tmp_path = self.root.join(format!("{}.json.tmp", name));

        let json = serde_json::to_string_pretty(items)?;

        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &final_path)?;

        Ok(())
    }
}

fn acquire<'a>(lock: &'a Mutex<()>, name: &str) -> Result<MutexGuard<'a, ()>, StoreError> {
    lock.lock()
        .map_err(|_| StoreError::LockPoisoned(name.to_string()))
}
