// ABOUTME: Module root for log exporters.
// ABOUTME: Re-exports the CSV encoder and export naming helpers.

pub mod csv;

pub use csv::{CSV_COLUMNS, DOWNLOAD_FILE_NAME, encode_csv, export_file_name};
