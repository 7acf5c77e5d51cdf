use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Plain-text liveness probe at the root path.
pub async fn index() -> &'static str {
    "Lesson backend is running!"
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "lesson-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
