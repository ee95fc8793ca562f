// ABOUTME: API module containing the HTTP handler functions for the uls REST API.
// ABOUTME: Organized into sub-modules for key issuance and log operations.

pub mod keys;
pub mod logs;
