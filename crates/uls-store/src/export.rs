// ABOUTME: Writes timestamped CSV snapshots of the log collection into the exports directory.
// ABOUTME: Refuses to export an empty collection and reports write failures to the caller.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use uls_core::{LogEntry, encode_csv, export_file_name};

use crate::logs::LogStore;

/// Errors that can occur while producing a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no logs to export")]
    NoLogs,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A CSV snapshot that has been written to disk.
#[derive(Debug, Clone)]
pub struct CsvExport {
    /// Server-side file name, `logs_YYYYMMDD_HHMMSS.csv`.
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Produces CSV exports of the log store under `exports_dir`.
#[derive(Clone)]
pub struct ExportWriter {
    logs: LogStore,
    exports_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(logs: LogStore, exports_dir: PathBuf) -> Self {
        Self { logs, exports_dir }
    }

    pub fn exports_dir(&self) -> &std::path::Path {
        &self.exports_dir
    }

    /// Export every stored entry, in stored order, stamped with the current
    /// local time.
    pub fn export(&self) -> Result<CsvExport, ExportError> {
        self.export_at(Local::now().naive_local())
    }

    /// Export stamped with `now`. A snapshot taken in the same second as an
    /// earlier one replaces it.
    pub fn export_at(&self, now: NaiveDateTime) -> Result<CsvExport, ExportError> {
        let logs: Vec<LogEntry> = self.logs.list_all(false);
        if logs.is_empty() {
            return Err(ExportError::NoLogs);
        }

        fs::create_dir_all(&self.exports_dir)?;

        let file_name = export_file_name(now);
        let path = self.exports_dir.join(&file_name);
        let bytes = encode_csv(&logs).into_bytes();
        fs::write(&path, &bytes)?;

        tracing::info!("exported {} logs to {}", logs.len(), path.display());

        Ok(CsvExport {
            file_name,
            path,
            bytes,
        })
    }
}
