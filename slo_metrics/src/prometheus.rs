//! Prometheus-backed sink.
//!
//! Each sink owns its own [`Registry`], so several trackers (or tests) never
//! share series unless they are handed the same sink.

use crate::catalog::{FamilyKind, MetricFamily, CATALOG};
use crate::error::{Result, SinkError};
use crate::labels::LabelSet;
use crate::sink::MetricsSink;
use parking_lot::RwLock;
use prometheus::{Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct PrometheusSink {
    registry: Registry,
    gauges: RwLock<HashMap<String, GaugeVec>>,
    histograms: RwLock<HashMap<String, HistogramVec>>,
}

impl PrometheusSink {
    /// Sink over a fresh registry with the whole catalog registered.
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Result<Self> {
        let sink = Self {
            registry,
            gauges: RwLock::new(HashMap::new()),
            histograms: RwLock::new(HashMap::new()),
        };

        for family in CATALOG {
            sink.register(family)?;
        }

        Ok(sink)
    }

    pub fn register(&self, family: &MetricFamily) -> Result<()> {
        match family.kind {
            FamilyKind::Gauge => self.register_gauge(family.name, family.help, family.labels),
            FamilyKind::Histogram { buckets } => {
                self.register_histogram(family.name, family.help, family.labels, buckets)
            }
        }
    }

    pub fn register_gauge(&self, name: &str, help: &str, labels: &[&str]) -> Result<()> {
        let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
        self.registry.register(Box::new(gauge.clone()))?;
        self.gauges.write().insert(name.to_string(), gauge);
        debug!("Registered gauge family {}", name);
        Ok(())
    }

    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
        buckets: &[f64],
    ) -> Result<()> {
        let opts = HistogramOpts::new(name, help).buckets(buckets.to_vec());
        let histogram = HistogramVec::new(opts, labels)?;
        self.registry.register(Box::new(histogram.clone()))?;
        self.histograms.write().insert(name.to_string(), histogram);
        debug!("Registered histogram family {}", name);
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current value of a gauge series, if the family and label set exist.
    pub fn gauge_value(&self, metric: &str, labels: &LabelSet) -> Result<f64> {
        let gauges = self.gauges.read();
        let family = gauges
            .get(metric)
            .ok_or_else(|| SinkError::UnknownFamily(metric.to_string()))?;
        Ok(family.get_metric_with(&labels.as_map())?.get())
    }

    pub fn histogram_count(&self, metric: &str, labels: &LabelSet) -> Result<u64> {
        let histograms = self.histograms.read();
        let family = histograms
            .get(metric)
            .ok_or_else(|| SinkError::UnknownFamily(metric.to_string()))?;
        Ok(family.get_metric_with(&labels.as_map())?.get_sample_count())
    }

    /// Renders every registered family in the Prometheus text exposition
    /// format.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}

impl MetricsSink for PrometheusSink {
    fn set(&self, metric: &str, labels: &LabelSet, value: f64) {
        let gauges = self.gauges.read();
        let Some(family) = gauges.get(metric) else {
            warn!("Dropping update for unregistered gauge {}", metric);
            return;
        };

        match family.get_metric_with(&labels.as_map()) {
            Ok(gauge) => gauge.set(value),
            Err(e) => warn!("Dropping update for gauge {}: {}", metric, e),
        }
    }

    fn observe(&self, metric: &str, labels: &LabelSet, value: f64) {
        let histograms = self.histograms.read();
        let Some(family) = histograms.get(metric) else {
            warn!("Dropping sample for unregistered histogram {}", metric);
            return;
        };

        match family.get_metric_with(&labels.as_map()) {
            Ok(histogram) => histogram.observe(value),
            Err(e) => warn!("Dropping sample for histogram {}: {}", metric, e),
        }
    }
}
