// ABOUTME: API key store backed by the "api_keys" collection.
// ABOUTME: Issues new keys and checks membership against a fresh read on every call.

use std::sync::Arc;

use uls_core::generate_api_key;

use crate::collection::{CollectionStore, StoreError};

pub const KEYS_COLLECTION: &str = "api_keys";

/// The set of issued API keys. Keys are never revoked individually.
#[derive(Clone)]
pub struct KeyStore {
    store: Arc<CollectionStore>,
}

impl KeyStore {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Generate a key, persist it, and return it. No uniqueness check is made;
    /// a duplicate would only waste space.
    pub fn issue(&self) -> Result<String, StoreError> {
        let key = generate_api_key();
        let total = self.store.update(KEYS_COLLECTION, |keys: &mut Vec<String>| {
            keys.push(key.clone());
            keys.len()
        })?;
        tracing::info!("issued API key ({} total)", total);
        Ok(key)
    }

    /// True iff `candidate` is non-empty and has been issued.
    pub fn is_valid(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let keys: Vec<String> = self.store.load(KEYS_COLLECTION);
        keys.iter().any(|k| k == candidate)
    }
}
