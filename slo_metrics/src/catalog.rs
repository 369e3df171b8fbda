//! Metric families known to the sinks.
//!
//! The five `slo_*` gauges are a compatibility contract with existing
//! dashboards: names and label schemas must not change.

use crate::labels::LabelSet;
use crate::sink::MetricsSink;

pub const SLO_AVAILABILITY: &str = "slo_availability";
pub const SLO_LATENCY_P99: &str = "slo_latency_p99";
pub const SLO_ERROR_RATE: &str = "slo_error_rate";
pub const SLO_COMPLIANCE: &str = "slo_compliance";
pub const SLO_BUDGET_REMAINING: &str = "slo_budget_remaining";

pub const API_ENDPOINT_LATENCY: &str = "api_endpoint_latency_seconds";
pub const SERVICE_REQUEST_DURATION: &str = "service_request_duration_seconds";
pub const SERVICE_ERROR_RATE: &str = "service_error_rate";

const SLO_LABELS: &[&str] = &["service", "slo_name"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FamilyKind {
    Gauge,
    Histogram { buckets: &'static [f64] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricFamily {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: FamilyKind,
}

pub static CATALOG: &[MetricFamily] = &[
    MetricFamily {
        name: SLO_AVAILABILITY,
        help: "Service availability SLO (0-1)",
        labels: SLO_LABELS,
        kind: FamilyKind::Gauge,
    },
    MetricFamily {
        name: SLO_LATENCY_P99,
        help: "P99 latency SLO in seconds",
        labels: SLO_LABELS,
        kind: FamilyKind::Gauge,
    },
    MetricFamily {
        name: SLO_ERROR_RATE,
        help: "Error rate SLO (0-1)",
        labels: SLO_LABELS,
        kind: FamilyKind::Gauge,
    },
    MetricFamily {
        name: SLO_COMPLIANCE,
        help: "SLO compliance percentage (0-100)",
        labels: SLO_LABELS,
        kind: FamilyKind::Gauge,
    },
    MetricFamily {
        name: SLO_BUDGET_REMAINING,
        help: "Remaining error budget for SLO",
        labels: SLO_LABELS,
        kind: FamilyKind::Gauge,
    },
    MetricFamily {
        name: API_ENDPOINT_LATENCY,
        help: "API endpoint response latency",
        labels: &["endpoint", "method"],
        kind: FamilyKind::Histogram {
            buckets: &[0.01, 0.05, 0.1, 0.5, 1.0],
        },
    },
    MetricFamily {
        name: SERVICE_REQUEST_DURATION,
        help: "Request duration for microservices",
        labels: &["service", "endpoint", "method"],
        kind: FamilyKind::Histogram {
            buckets: &[0.01, 0.05, 0.1, 0.5, 1.0, 5.0],
        },
    },
    MetricFamily {
        name: SERVICE_ERROR_RATE,
        help: "Error rate for each service (0-1)",
        labels: &["service", "error_type"],
        kind: FamilyKind::Gauge,
    },
];

pub fn find(name: &str) -> Option<&'static MetricFamily> {
    CATALOG.iter().find(|family| family.name == name)
}

/// Observes one served request on the endpoint and service latency
/// histograms.
pub fn record_request(
    sink: &dyn MetricsSink,
    service: &str,
    endpoint: &str,
    method: &str,
    latency_seconds: f64,
) {
    sink.observe(
        API_ENDPOINT_LATENCY,
        &LabelSet::new().with("endpoint", endpoint).with("method", method),
        latency_seconds,
    );
    sink.observe(
        SERVICE_REQUEST_DURATION,
        &LabelSet::new()
            .with("service", service)
            .with("endpoint", endpoint)
            .with("method", method),
        latency_seconds,
    );
}

/// Sets the running error ratio of a service for one error class, e.g.
/// `http_5xx`.
pub fn record_service_error_rate(
    sink: &dyn MetricsSink,
    service: &str,
    error_type: &str,
    error_rate: f64,
) {
    sink.set(
        SERVICE_ERROR_RATE,
        &LabelSet::new()
            .with("service", service)
            .with("error_type", error_type),
        error_rate,
    );
}
