// ABOUTME: Route definitions for the uls HTTP API.
// ABOUTME: Open routes (health, key issuance) and key-protected log routes share one Router and state.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::AuthLayer;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/api/logs", get(api::logs::list_logs).post(api::logs::submit_log))
        .route("/api/logs/export", get(api::logs::export_logs))
        .route("/api/logs/clear", post(api::logs::clear_logs))
        .route_layer(AuthLayer::new(state.storage.keys().clone()));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/key/generate", post(api::keys::generate_key))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "success", "message": "API running" }))
}
