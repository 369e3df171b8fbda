use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slo_core::SloKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloStatus {
    pub slo_name: String,
    pub kind: SloKind,
    pub target: f64,
    pub window_secs: u64,
    pub actual: f64,
    pub compliance: f64,
    pub budget_remaining: f64,
    /// Actual value compared against the target in the kind's direction.
    pub met: bool,
}

impl SloStatus {
    pub fn is_met(&self) -> bool {
        self.met
    }

    pub fn window_display(&self) -> String {
        humantime::format_duration(std::time::Duration::from_secs(self.window_secs)).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloReport {
    pub service: String,
    pub generated_at: DateTime<Utc>,
    pub statuses: Vec<SloStatus>,
}

impl SloReport {
    pub fn new(service: impl Into<String>, statuses: Vec<SloStatus>) -> Self {
        Self {
            service: service.into(),
            generated_at: Utc::now(),
            statuses,
        }
    }

    pub fn status(&self, slo_name: &str) -> Option<&SloStatus> {
        self.statuses.iter().find(|s| s.slo_name == slo_name)
    }

    pub fn met_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_met()).count()
    }

    pub fn all_met(&self) -> bool {
        self.statuses.iter().all(SloStatus::is_met)
    }

    /// Mean compliance across all evaluated SLOs, 0 when nothing was
    /// evaluated.
    pub fn average_compliance(&self) -> f64 {
        if self.statuses.is_empty() {
            return 0.0;
        }
        self.statuses.iter().map(|s| s.compliance).sum::<f64>() / self.statuses.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, compliance: f64, met: bool) -> SloStatus {
        SloStatus {
            slo_name: name.to_string(),
            kind: SloKind::from_name(name),
            target: 0.999,
            window_secs: 30 * 86_400,
            actual: 0.0,
            compliance,
            budget_remaining: 0.0,
            met,
        }
    }

    #[test]
    fn test_report_summary() {
        let report = SloReport::new(
            "svc",
            vec![status("availability", 100.0, true), status("latency_p99", 50.0, false)],
        );

        assert_eq!(report.met_count(), 1);
        assert!(!report.all_met());
        assert_eq!(report.average_compliance(), 75.0);
        assert!(report.status("latency_p99").is_some());
        assert!(report.status("error_rate").is_none());
    }

    #[test]
    fn test_empty_report() {
        let report = SloReport::new("svc", Vec::new());
        assert_eq!(report.average_compliance(), 0.0);
        assert!(report.all_met());
    }

    #[test]
    fn test_window_display() {
        assert_eq!(status("availability", 100.0, true).window_display(), "30days");
    }
}
