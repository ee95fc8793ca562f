// ABOUTME: Persistence layer for uls, storing keys and logs as whole JSON documents on disk.
// ABOUTME: Provides the locked collection store, key and log stores, CSV export writer, and directory manager.

pub mod collection;
pub mod export;
pub mod keys;
pub mod logs;
pub mod manager;

pub use collection::{CollectionStore, StoreError};
pub use export::{CsvExport, ExportError, ExportWriter};
pub use keys::KeyStore;
pub use logs::LogStore;
pub use manager::StorageManager;
