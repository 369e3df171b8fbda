pub mod handlers;
pub mod middleware;
pub mod state;

pub use state::{AppState, RequestCounters};

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/slo", get(handlers::slo_report))
        .route("/api/data", get(handlers::get_data))
        .route("/api/process", post(handlers::process_data))
        // Panics become 500s before the SLO middleware sees the response.
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_slos,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Waits for `signal`, then marks the service not ready so `/ready` fails
/// while in-flight requests drain.
pub async fn shutdown_on<F>(state: AppState, signal: F)
where
    F: Future<Output = ()>,
{
    signal.await;
    tracing::info!("Shutdown requested, marking service not ready");
    state.set_ready(false);
}
