use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use slo_metrics::SloReport;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub uptime_seconds: u64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.tracker.service_name().to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready" })),
        )
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.sink.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, state.sink.content_type())], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn slo_report(State(state): State<AppState>) -> Json<SloReport> {
    Json(state.tracker.evaluate_windows())
}

pub async fn get_data() -> Json<Value> {
    // Simulated fetch
    tokio::time::sleep(Duration::from_millis(50)).await;

    Json(json!({
        "message": "Hello, World!",
        "timestamp": chrono::Utc::now(),
    }))
}

pub async fn process_data(Json(data): Json<Value>) -> Json<Value> {
    // Simulated processing
    tokio::time::sleep(Duration::from_millis(100)).await;

    let count = match &data {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 1,
    };

    Json(json!({
        "status": "success",
        "result": { "processed": true, "count": count },
    }))
}
