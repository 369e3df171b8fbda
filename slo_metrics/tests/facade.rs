use metrics_exporter_prometheus::PrometheusBuilder;
use slo_core::SloDefinition;
use slo_metrics::{FacadeSink, SloTracker};
use std::sync::Arc;

#[test]
fn facade_sink_reaches_installed_recorder() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        let sink = FacadeSink::new();
        sink.describe_catalog();

        let tracker = SloTracker::new(
            "facade-service",
            vec![("latency_p99", SloDefinition::days(0.1, 7))],
            Arc::new(sink),
        );
        tracker.record_latency(0.2);
        tracker.calculate_compliance("latency_p99", 0.2);
    });

    let output = handle.render();
    assert!(output.contains("slo_latency_p99"));
    assert!(output.contains("slo_compliance"));
    assert!(output.contains(r#"service="facade-service""#));
    assert!(output.contains(r#"slo_name="latency_p99""#));
}
