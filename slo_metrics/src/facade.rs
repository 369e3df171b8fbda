use crate::catalog::{FamilyKind, CATALOG};
use crate::labels::LabelSet;
use crate::sink::MetricsSink;
use metrics::Label;

/// Sink that forwards updates to whatever recorder is installed for the
/// `metrics` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeSink;

impl FacadeSink {
    pub fn new() -> Self {
        Self
    }

    /// Publishes help text for every catalog family to the current recorder.
    pub fn describe_catalog(&self) {
        for family in CATALOG {
            match family.kind {
                FamilyKind::Gauge => metrics::describe_gauge!(family.name, family.help),
                FamilyKind::Histogram { .. } => {
                    metrics::describe_histogram!(family.name, family.help)
                }
            }
        }
    }

    fn labels(labels: &LabelSet) -> Vec<Label> {
        labels
            .iter()
            .map(|(k, v)| Label::new(k.to_string(), v.to_string()))
            .collect()
    }
}

impl MetricsSink for FacadeSink {
    fn set(&self, metric: &str, labels: &LabelSet, value: f64) {
        metrics::gauge!(metric.to_string(), Self::labels(labels)).set(value);
    }

    fn observe(&self, metric: &str, labels: &LabelSet, value: f64) {
        metrics::histogram!(metric.to_string(), Self::labels(labels)).record(value);
    }
}
