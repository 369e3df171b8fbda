use crate::state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use slo_metrics::catalog;
use std::time::Instant;
use tracing::info;

/// Endpoint label for requests that matched no route.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Records latency, availability and error rate for every request, both as
/// live gauges and as observations in the tracker's trailing window.
pub async fn track_slos(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    // Route templates keep the endpoint label bounded.
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ENDPOINT.to_string(), |m| m.as_str().to_string());

    let response = next.run(request).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();
    let available = status < 500;
    let rates = state.counters.record(status);
    let tracker = &state.tracker;
    let service = tracker.service_name();

    catalog::record_request(state.sink.as_ref(), service, &endpoint, &method, latency);
    catalog::record_service_error_rate(
        state.sink.as_ref(),
        service,
        "http_5xx",
        rates.server_error_rate,
    );

    tracker.record_availability(available);
    tracker.record_latency(latency);
    tracker.record_error_rate(rates.error_rate);

    tracker.record_observation(slo_core::AVAILABILITY, if available { 1.0 } else { 0.0 });
    tracker.record_observation(slo_core::LATENCY_P99, latency);
    tracker.record_observation(slo_core::ERROR_RATE, rates.error_rate);

    info!("{} {} - {} - {:.3}s", method, path, status, latency);

    response
}
