// ABOUTME: Presentation ordering for log entries: newest first by ISO-8601 timestamp.
// ABOUTME: Entries whose timestamps cannot be compared sink to the end in stored order.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::entry::LogEntry;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// What `sort_newest_first` actually did to the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// Every entry is ordered by descending timestamp.
    NewestFirst,
    /// `unordered` entries had timestamps that are not ISO-8601. They follow
    /// the sorted entries, in the order they were stored.
    PartiallyOrdered { unordered: usize },
}

/// Whether `ts` is an ISO-8601 timestamp: RFC 3339, a date-time separated by
/// `T` or a space with optional fractional seconds and optional numeric
/// offset, or a bare calendar date.
pub fn is_iso8601(ts: &str) -> bool {
    DateTime::parse_from_rfc3339(ts).is_ok()
        || NAIVE_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(ts, f).is_ok())
        || OFFSET_FORMATS
            .iter()
            .any(|f| DateTime::parse_from_str(ts, f).is_ok())
        || NaiveDate::parse_from_str(ts, "%Y-%m-%d").is_ok()
}

/// Comparable form of an ISO-8601 timestamp, or `None` when `ts` is not one.
/// The date/time separator is normalized to `T` so space-separated values
/// interleave with `T`-separated ones.
fn sort_key(ts: &str) -> Option<String> {
    if !is_iso8601(ts) {
        return None;
    }
    let mut key = ts.to_string();
    if key.as_bytes().get(10) == Some(&b' ') {
        key.replace_range(10..11, "T");
    }
    Some(key)
}

/// Order entries newest first.
///
/// The sort is stable: entries with equal timestamps keep their relative
/// insertion order. Entries whose timestamps are not ISO-8601 cannot be
/// placed in time, so they are moved after all the others without being
/// reordered among themselves.
pub fn sort_newest_first(entries: &mut [LogEntry]) -> SortOutcome {
    entries.sort_by_cached_key(|e| Reverse(sort_key(&e.timestamp)));

    let unordered = entries
        .iter()
        .rev()
        .take_while(|e| !is_iso8601(&e.timestamp))
        .count();
    if unordered == 0 {
        SortOutcome::NewestFirst
    } else {
        SortOutcome::PartiallyOrdered { unordered }
    }
}
