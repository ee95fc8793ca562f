// ABOUTME: Encodes a log collection as a CSV document with a fixed six-column header.
// ABOUTME: Uses minimal quoting and CRLF record separators, and names server-side snapshots by timestamp.

use chrono::NaiveDateTime;

use crate::entry::LogEntry;

/// Header row, in the order fields are emitted for each entry.
pub const CSV_COLUMNS: [&str; 6] = ["timestamp", "service", "level", "message", "server", "trace_id"];

/// Name the client sees on download, independent of the stored file name.
pub const DOWNLOAD_FILE_NAME: &str = "logs.csv";

const RECORD_SEPARATOR: &str = "\r\n";

/// Render entries as CSV, one row per entry in slice order.
pub fn encode_csv(entries: &[LogEntry]) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_COLUMNS);
    for entry in entries {
        push_record(&mut out, entry.fields());
    }
    out
}

/// Server-side snapshot name: `logs_YYYYMMDD_HHMMSS.csv`.
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("logs_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn push_record(out: &mut String, fields: [&str; 6]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(RECORD_SEPARATOR);
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
