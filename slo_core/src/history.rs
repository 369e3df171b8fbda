use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Observations kept per SLO when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Bounded observation log per SLO.
///
/// Each series holds at most `capacity` entries; the oldest entry is evicted
/// when a new one would exceed it. Entries older than the trailing window are
/// dropped whenever a windowed write or read touches the series.
pub struct SloHistory {
    capacity: usize,
    series: RwLock<HashMap<String, VecDeque<Observation>>>,
}

impl Default for SloHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SloHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            series: RwLock::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self, slo_name: &str, value: f64) {
        self.record_at(slo_name, Utc::now(), value);
    }

    /// Observations are expected in timestamp order; an out-of-order entry is
    /// kept but may survive pruning longer than its own timestamp implies.
    pub fn record_at(&self, slo_name: &str, timestamp: DateTime<Utc>, value: f64) {
        let mut series = self.series.write();
        let entries = series.entry(slo_name.to_string()).or_default();
        self.push(entries, Observation { timestamp, value });
    }

    /// Records an observation and drops everything that fell out of the
    /// window ending at `timestamp`.
    pub fn record_within(&self, slo_name: &str, window: Duration, timestamp: DateTime<Utc>, value: f64) {
        let mut series = self.series.write();
        let entries = series.entry(slo_name.to_string()).or_default();
        prune(entries, window, timestamp);
        self.push(entries, Observation { timestamp, value });
    }

    /// Drops everything older than `now - window` and returns the mean of what
    /// remains.
    pub fn mean_within(&self, slo_name: &str, window: Duration, now: DateTime<Utc>) -> Option<f64> {
        let mut series = self.series.write();
        let entries = series.get_mut(slo_name)?;
        prune(entries, window, now);

        if entries.is_empty() {
            return None;
        }

        let sum: f64 = entries.iter().map(|o| o.value).sum();
        Some(sum / entries.len() as f64)
    }

    /// Nearest-rank quantile (`0 < quantile <= 1`) of the observations inside
    /// the window.
    pub fn quantile_within(
        &self,
        slo_name: &str,
        window: Duration,
        now: DateTime<Utc>,
        quantile: f64,
    ) -> Option<f64> {
        let mut series = self.series.write();
        let entries = series.get_mut(slo_name)?;
        prune(entries, window, now);

        let mut values: Vec<f64> = entries.iter().map(|o| o.value).collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let rank = (quantile.clamp(0.0, 1.0) * values.len() as f64).ceil() as usize;
        Some(values[rank.clamp(1, values.len()) - 1])
    }

    pub fn len(&self, slo_name: &str) -> usize {
        self.series.read().get(slo_name).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.series.read().values().all(VecDeque::is_empty)
    }

    pub fn snapshot(&self, slo_name: &str) -> Vec<Observation> {
        self.series
            .read()
            .get(slo_name)
            .map(|entries| entries.iter().copied().collect())
            .unwrap_or_default()
    }

    fn push(&self, entries: &mut VecDeque<Observation>, observation: Observation) {
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(observation);
    }
}

fn prune(entries: &mut VecDeque<Observation>, window: Duration, now: DateTime<Utc>) {
    let Ok(window) = chrono::Duration::from_std(window) else {
        return;
    };
    let Some(cutoff) = now.checked_sub_signed(window) else {
        return;
    };
    while entries.front().is_some_and(|o| o.timestamp < cutoff) {
        entries.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_within_prunes_old_entries() {
        let history = SloHistory::new();
        let now = Utc::now();

        history.record_at("latency_p99", now - chrono::Duration::hours(3), 10.0);
        history.record_at("latency_p99", now - chrono::Duration::minutes(30), 0.2);
        history.record_at("latency_p99", now, 0.4);

        let mean = history
            .mean_within("latency_p99", Duration::from_secs(3600), now)
            .unwrap();
        assert!((mean - 0.3).abs() < 1e-12);
        assert_eq!(history.len("latency_p99"), 2);
    }

    #[test]
    fn test_mean_within_empty() {
        let history = SloHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.mean_within("availability", Duration::from_secs(60), Utc::now()), None);

        let now = Utc::now();
        history.record_at("availability", now - chrono::Duration::hours(2), 1.0);
        assert_eq!(history.mean_within("availability", Duration::from_secs(60), now), None);
        assert_eq!(history.len("availability"), 0);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let history = SloHistory::new();
        history.record("error_rate", 0.1);
        history.record("error_rate", 0.2);

        let values: Vec<f64> = history.snapshot("error_rate").iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0.1, 0.2]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = SloHistory::with_capacity(100);
        for i in 0..1_000 {
            history.record("latency_p99", i as f64);
        }

        assert_eq!(history.len("latency_p99"), 100);
        let snapshot = history.snapshot("latency_p99");
        assert_eq!(snapshot.first().map(|o| o.value), Some(900.0));
        assert_eq!(snapshot.last().map(|o| o.value), Some(999.0));
    }

    #[test]
    fn test_record_within_prunes_on_write() {
        let history = SloHistory::new();
        let now = Utc::now();
        let window = Duration::from_secs(3600);

        history.record_at("availability", now - chrono::Duration::hours(5), 0.0);
        history.record_at("availability", now - chrono::Duration::hours(4), 0.0);
        history.record_within("availability", window, now, 1.0);

        assert_eq!(history.len("availability"), 1);
        assert_eq!(history.mean_within("availability", window, now), Some(1.0));
    }

    #[test]
    fn test_quantile_within() {
        let history = SloHistory::new();
        let now = Utc::now();
        let window = Duration::from_secs(3600);

        for i in 1..=100 {
            history.record_at("latency_p99", now, i as f64 / 100.0);
        }

        assert_eq!(history.quantile_within("latency_p99", window, now, 0.99), Some(0.99));
        assert_eq!(history.quantile_within("latency_p99", window, now, 0.5), Some(0.5));
        assert_eq!(history.quantile_within("latency_p99", window, now, 1.0), Some(1.0));
        assert_eq!(history.quantile_within("latency_p99", window, now, 0.0), Some(0.01));
        assert_eq!(history.quantile_within("unknown", window, now, 0.99), None);
    }
}
