use axum::Json;
use serde_json::{json, Value};

/// GET /health - liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().timestamp(),
    }))
}
