//! Service level objective tracking.
//!
//! [`SloTracker`] evaluates observations against the targets it was built
//! with and forwards every recorded or derived value to a [`MetricsSink`].
//! The arithmetic itself lives on [`SloKind`]; the tracker only resolves
//! definitions and emits.

use crate::catalog::{
    SLO_AVAILABILITY, SLO_BUDGET_REMAINING, SLO_COMPLIANCE, SLO_ERROR_RATE, SLO_LATENCY_P99,
};
use crate::labels::LabelSet;
use crate::report::{SloReport, SloStatus};
use crate::sink::MetricsSink;
use chrono::Utc;
use slo_core::{SloDefinition, SloHistory, SloKind, TrackerConfig};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub struct SloTracker {
    service_name: String,
    slo_definitions: BTreeMap<String, SloDefinition>,
    metrics_history: SloHistory,
    sink: Arc<dyn MetricsSink>,
}

impl SloTracker {
    pub fn new<I, S>(service_name: impl Into<String>, slo_definitions: I, sink: Arc<dyn MetricsSink>) -> Self
    where
        I: IntoIterator<Item = (S, SloDefinition)>,
        S: Into<String>,
    {
        Self {
            service_name: service_name.into(),
            slo_definitions: slo_definitions
                .into_iter()
                .map(|(name, def)| (name.into(), def))
                .collect(),
            metrics_history: SloHistory::new(),
            sink,
        }
    }

    pub fn from_config(config: TrackerConfig, sink: Arc<dyn MetricsSink>) -> Self {
        Self::new(config.service, config.slos, sink)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn definitions(&self) -> &BTreeMap<String, SloDefinition> {
        &self.slo_definitions
    }

    pub fn definition(&self, slo_name: &str) -> Option<&SloDefinition> {
        self.slo_definitions.get(slo_name)
    }

    pub fn kind_of(&self, slo_name: &str) -> Option<SloKind> {
        self.definition(slo_name).map(|def| def.kind_for(slo_name))
    }

    /// Replaces the observation history with one bounded to `capacity`
    /// entries per SLO.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.metrics_history = SloHistory::with_capacity(capacity);
        self
    }

    pub fn history(&self) -> &SloHistory {
        &self.metrics_history
    }

    pub fn history_len(&self, slo_name: &str) -> usize {
        self.metrics_history.len(slo_name)
    }

    pub fn record_availability(&self, available: bool) {
        self.record_availability_for(slo_core::AVAILABILITY, available);
    }

    pub fn record_availability_for(&self, slo_name: &str, available: bool) {
        self.emit(SLO_AVAILABILITY, slo_name, if available { 1.0 } else { 0.0 });
    }

    pub fn record_latency(&self, latency_seconds: f64) {
        self.record_latency_for(slo_core::LATENCY_P99, latency_seconds);
    }

    pub fn record_latency_for(&self, slo_name: &str, latency_seconds: f64) {
        self.emit(SLO_LATENCY_P99, slo_name, latency_seconds);
    }

    pub fn record_error_rate(&self, error_rate: f64) {
        self.record_error_rate_for(slo_core::ERROR_RATE, error_rate);
    }

    pub fn record_error_rate_for(&self, slo_name: &str, error_rate: f64) {
        self.emit(SLO_ERROR_RATE, slo_name, error_rate);
    }

    /// Compliance percentage in `[0, 100]`, or `0.0` for an unknown SLO (in
    /// which case nothing is emitted).
    pub fn calculate_compliance(&self, slo_name: &str, actual_value: f64) -> f64 {
        let Some(definition) = self.definition(slo_name) else {
            debug!("No SLO named '{}' for {}", slo_name, self.service_name);
            return 0.0;
        };

        let compliance = definition
            .kind_for(slo_name)
            .compliance(definition.target, actual_value);
        self.emit(SLO_COMPLIANCE, slo_name, compliance);
        compliance
    }

    /// Remaining error budget, never negative, or `0.0` for an unknown SLO.
    pub fn calculate_error_budget(&self, slo_name: &str, actual_value: f64) -> f64 {
        let Some(definition) = self.definition(slo_name) else {
            debug!("No SLO named '{}' for {}", slo_name, self.service_name);
            return 0.0;
        };

        let budget = definition
            .kind_for(slo_name)
            .error_budget(definition.target, actual_value);
        self.emit(SLO_BUDGET_REMAINING, slo_name, budget);
        budget
    }

    /// Appends an observation to the SLO's history, dropping entries that
    /// left its window. Returns `false` and records nothing when the SLO is
    /// unknown.
    pub fn record_observation(&self, slo_name: &str, value: f64) -> bool {
        let Some(definition) = self.definition(slo_name) else {
            return false;
        };
        self.metrics_history
            .record_within(slo_name, definition.window, Utc::now(), value);
        true
    }

    /// Mean of the observations inside the SLO's trailing window.
    pub fn windowed_mean(&self, slo_name: &str) -> Option<f64> {
        let definition = self.definition(slo_name)?;
        self.metrics_history
            .mean_within(slo_name, definition.window, Utc::now())
    }

    /// The value a window evaluation compares against the target: a
    /// percentile for latency SLOs (taken from a `_pNN` name suffix, p99
    /// otherwise) and the mean for every other kind.
    pub fn windowed_value(&self, slo_name: &str) -> Option<f64> {
        let definition = self.definition(slo_name)?;
        match definition.kind_for(slo_name) {
            SloKind::Latency => self.metrics_history.quantile_within(
                slo_name,
                definition.window,
                Utc::now(),
                latency_quantile(slo_name),
            ),
            SloKind::Availability | SloKind::ErrorRate => self.windowed_mean(slo_name),
        }
    }

    /// Evaluates compliance and budget against the trailing-window value.
    /// `None` when the SLO is unknown or has no observations in its window.
    pub fn evaluate_window(&self, slo_name: &str) -> Option<SloStatus> {
        let actual = self.windowed_value(slo_name)?;
        self.status(slo_name, actual)
    }

    /// Evaluates every supplied actual value. Unknown SLO names are skipped.
    pub fn evaluate<'a, I>(&self, actuals: I) -> SloReport
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let statuses = actuals
            .into_iter()
            .filter_map(|(slo_name, actual)| {
                let status = self.status(slo_name, actual);
                if status.is_none() {
                    debug!("Skipping unknown SLO '{}' in evaluation", slo_name);
                }
                status
            })
            .collect();

        SloReport::new(self.service_name.clone(), statuses)
    }

    /// Window evaluation of every defined SLO that has observations.
    pub fn evaluate_windows(&self) -> SloReport {
        let statuses = self
            .slo_definitions
            .keys()
            .filter_map(|slo_name| self.evaluate_window(slo_name))
            .collect();

        SloReport::new(self.service_name.clone(), statuses)
    }

    fn status(&self, slo_name: &str, actual: f64) -> Option<SloStatus> {
        let definition = self.definition(slo_name)?;

        let kind = definition.kind_for(slo_name);

        Some(SloStatus {
            slo_name: slo_name.to_string(),
            kind,
            target: definition.target,
            window_secs: definition.window.as_secs(),
            actual,
            compliance: self.calculate_compliance(slo_name, actual),
            budget_remaining: self.calculate_error_budget(slo_name, actual),
            met: kind.is_met(definition.target, actual),
        })
    }

    fn emit(&self, metric: &str, slo_name: &str, value: f64) {
        self.sink
            .set(metric, &LabelSet::slo(&self.service_name, slo_name), value);
    }
}

/// `latency_p95` -> 0.95, `checkout_p999` -> 0.999; 0.99 when the name
/// carries no percentile.
fn latency_quantile(slo_name: &str) -> f64 {
    slo_name
        .rsplit_once("_p")
        .map(|(_, digits)| digits)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| {
            let rank: u32 = digits.parse().ok()?;
            let scale = 10f64.powi(i32::try_from(digits.len()).ok()?);
            Some(f64::from(rank) / scale)
        })
        .filter(|q| *q > 0.0 && *q < 1.0)
        .unwrap_or(0.99)
}
