use crate::labels::LabelSet;

/// Destination for metric updates. Implementations must tolerate concurrent
/// label-keyed updates and must not block.
#[cfg_attr(test, mockall::automock)]
pub trait MetricsSink: Send + Sync {
    /// Overwrites the current value of a gauge series.
    fn set(&self, metric: &str, labels: &LabelSet, value: f64);

    /// Adds a sample to a histogram series.
    fn observe(&self, metric: &str, labels: &LabelSet, value: f64);
}
