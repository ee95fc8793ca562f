// ABOUTME: Log API handlers for submission, listing, CSV export, and clearing.
// ABOUTME: All routes here sit behind the API key layer; submissions are normalized, never rejected.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uls_core::{DOWNLOAD_FILE_NAME, LogSubmission};

use crate::app_state::SharedState;
use crate::error::ApiError;

/// GET /api/logs - Every stored log, newest first.
pub async fn list_logs(State(state): State<SharedState>) -> impl IntoResponse {
    let logs = state.storage.logs().list_all(true);
    let count = logs.len();

    // `results` duplicates `logs` for older dashboard clients.
    Json(serde_json::json!({
        "status": "success",
        "logs": &logs,
        "results": &logs,
        "count": count,
    }))
}

/// POST /api/logs - Store one log entry. Any body is accepted; missing or
/// unparseable fields fall back to defaults.
pub async fn submit_log(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submission = LogSubmission::from_body(&body);
    let entry = state.storage.logs().append(submission)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "message": "Log saved",
            "log": entry,
        })),
    ))
}

/// GET /api/logs/export - Write a CSV snapshot server-side and return it as
/// a `logs.csv` attachment.
pub async fn export_logs(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let export = state.storage.exports().export()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", DOWNLOAD_FILE_NAME),
            ),
        ],
        export.bytes,
    ))
}

/// POST /api/logs/clear - Irreversibly drop every stored log.
pub async fn clear_logs(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    state.storage.logs().clear()?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Logs cleared",
    })))
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppState, SharedState};
    use crate::routes::create_router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use http::Request;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(dir: &TempDir) -> (SharedState, String) {
        let state = Arc::new(AppState::open(dir.path().to_path_buf()).unwrap());
        let key = state.storage.keys().issue().unwrap();
        (state, key)
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_log(state: &SharedState, key: &str, body: serde_json::Value) -> axum::response::Response {
        create_router(Arc::clone(state))
            .oneshot(
                Request::post("/api/logs")
                    .header("X-API-KEY", key)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(state: &SharedState, uri: &str, key: Option<&str>) -> axum::response::Response {
        let mut req = Request::get(uri);
        if let Some(key) = key {
            req = req.header("X-API-KEY", key);
        }
        create_router(Arc::clone(state))
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn submit_log_returns_201_with_defaults() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);

        let resp = post_log(&state, &key, serde_json::json!({ "message": "boot" })).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Log saved");
        assert_eq!(json["log"]["message"], "boot");
        assert_eq!(json["log"]["service"], "Unknown");
        assert_eq!(json["log"]["level"], "INFO");
        assert_eq!(json["log"]["server"], "Server-1");
        assert_eq!(json["log"]["trace_id"], "");
        assert!(uls_core::is_iso8601(json["log"]["timestamp"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn submit_log_accepts_non_json_body() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);

        let resp = create_router(Arc::clone(&state))
            .oneshot(
                Request::post("/api/logs")
                    .header("X-API-KEY", &key)
                    .header("content-type", "text/plain")
                    .body(Body::from("just some text"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["log"]["message"], "");
        assert_eq!(state.storage.logs().list_all(false).len(), 1);
    }

    #[tokio::test]
    async fn submit_log_without_key_is_rejected_and_not_stored() {
        let dir = TempDir::new().unwrap();
        let (state, _) = test_state(&dir);

        let resp = create_router(Arc::clone(&state))
            .oneshot(
                Request::post("/api/logs")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"sneaky"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(state.storage.logs().list_all(false).is_empty());
    }

    #[tokio::test]
    async fn list_logs_returns_newest_first_with_count() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);
        post_log(&state, &key, serde_json::json!({ "timestamp": "2024-01-01T00:00:00", "message": "jan" })).await;
        post_log(&state, &key, serde_json::json!({ "timestamp": "2024-06-01T00:00:00", "message": "jun" })).await;

        let resp = get(&state, "/api/logs", Some(&key)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 2);
        assert_eq!(json["logs"][0]["message"], "jun");
        assert_eq!(json["logs"][1]["message"], "jan");
        assert_eq!(json["results"], json["logs"]);
    }

    #[tokio::test]
    async fn list_logs_without_key_is_401() {
        let dir = TempDir::new().unwrap();
        let (state, _) = test_state(&dir);

        let resp = get(&state, "/api/logs", None).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Invalid or missing API key");
        assert!(json.get("logs").is_none());
    }

    #[tokio::test]
    async fn export_without_logs_is_400() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);

        let resp = get(&state, "/api/logs/export", Some(&key)).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "No logs to export");
        assert_eq!(std::fs::read_dir(dir.path().join("exports")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn export_returns_csv_attachment() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);
        post_log(&state, &key, serde_json::json!({ "service": "auth", "message": "hello" })).await;

        let resp = get(&state, "/api/logs/export", Some(&key)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/csv; charset=utf-8");
        assert_eq!(
            resp.headers()["content-disposition"],
            "attachment; filename=logs.csv"
        );
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("timestamp,service,level,message,server,trace_id\r\n"));
        assert!(text.contains(",auth,INFO,hello,Server-1,"));

        let stored: Vec<_> = std::fs::read_dir(dir.path().join("exports"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].starts_with("logs_") && stored[0].ends_with(".csv"));
    }

    #[tokio::test]
    async fn export_write_failure_is_500() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);
        post_log(&state, &key, serde_json::json!({ "message": "x" })).await;
        std::fs::remove_dir(dir.path().join("exports")).unwrap();
        std::fs::write(dir.path().join("exports"), "blocking file").unwrap();

        let resp = get(&state, "/api/logs/export", Some(&key)).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert!(json["message"].as_str().unwrap().starts_with("Failed to save CSV: "));
    }

    #[tokio::test]
    async fn clear_logs_empties_collection() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);
        for i in 0..5 {
            post_log(&state, &key, serde_json::json!({ "message": format!("entry {}", i) })).await;
        }

        let resp = create_router(Arc::clone(&state))
            .oneshot(
                Request::post("/api/logs/clear")
                    .header("X-API-KEY", &key)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["message"], "Logs cleared");

        let json = body_json(get(&state, "/api/logs", Some(&key)).await).await;
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn clear_logs_without_key_keeps_data() {
        let dir = TempDir::new().unwrap();
        let (state, key) = test_state(&dir);
        post_log(&state, &key, serde_json::json!({ "message": "keep me" })).await;

        let resp = create_router(Arc::clone(&state))
            .oneshot(Request::post("/api/logs/clear").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.storage.logs().list_all(false).len(), 1);
    }
}
