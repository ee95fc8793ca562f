// ABOUTME: Log store backed by the "logs" collection.
// ABOUTME: Appends normalized entries, lists them with optional newest-first ordering, and clears them.

use std::sync::Arc;

use chrono::Local;
use uls_core::{LogEntry, LogSubmission, SortOutcome, sort_newest_first};

use crate::collection::{CollectionStore, StoreError};

pub const LOGS_COLLECTION: &str = "logs";

/// Ordered, append-only collection of log entries. Stored order is insertion
/// order; reads may reorder a copy for presentation.
#[derive(Clone)]
pub struct LogStore {
    store: Arc<CollectionStore>,
}

impl LogStore {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Normalize a submission against the current local time and append it.
    pub fn append(&self, submission: LogSubmission) -> Result<LogEntry, StoreError> {
        let entry = submission.normalize(Local::now().naive_local());
        self.append_entry(entry)
    }

    /// Append an already-normalized entry.
    pub fn append_entry(&self, entry: LogEntry) -> Result<LogEntry, StoreError> {
        let count = self.store.update(LOGS_COLLECTION, |logs: &mut Vec<LogEntry>| {
            logs.push(entry.clone());
            logs.len()
        })?;
        tracing::debug!(
            "stored log from {} at {} ({} total)",
            entry.service,
            entry.timestamp,
            count
        );
        Ok(entry)
    }

    /// Every stored entry. With `newest_first`, the result is ordered by
    /// descending timestamp; entries whose timestamp is not ISO-8601 follow
    /// in stored order.
    pub fn list_all(&self, newest_first: bool) -> Vec<LogEntry> {
        let mut logs: Vec<LogEntry> = self.store.load(LOGS_COLLECTION);
        if newest_first
            && let SortOutcome::PartiallyOrdered { unordered } = sort_newest_first(&mut logs)
        {
            tracing::debug!(
                "{} logs have non-ISO-8601 timestamps; listed last in stored order",
                unordered
            );
        }
        logs
    }

    /// Drop every entry. Returns how many were removed.
    ///
    /// This replaces the document outright rather than going through
    /// `update`, so it also recovers a log document that no longer parses.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let removed = self.store.load::<LogEntry>(LOGS_COLLECTION).len();
        self.store.save::<LogEntry>(LOGS_COLLECTION, &[])?;
        tracing::info!("cleared {} logs", removed);
        Ok(removed)
    }
}
