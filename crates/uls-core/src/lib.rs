// ABOUTME: Core library for uls, containing the log entry model and pure domain logic.
// ABOUTME: Normalization, timestamp ordering, API key generation, and CSV encoding live here; no I/O.

pub mod entry;
pub mod export;
pub mod key;
pub mod order;

pub use entry::{LogEntry, LogSubmission};
pub use export::{CSV_COLUMNS, DOWNLOAD_FILE_NAME, encode_csv, export_file_name};
pub use key::{API_KEY_PREFIX, generate_api_key};
pub use order::{SortOutcome, is_iso8601, sort_newest_first};
