// ABOUTME: HTTP server for uls, exposing the log collection REST API.
// ABOUTME: Uses Axum with shared storage state, an API key layer, and JSON error responses.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, UlsConfig};
pub use error::ApiError;
pub use routes::create_router;
