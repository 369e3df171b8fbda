//! SLO families and the arithmetic attached to each of them.
//!
//! Compliance and error budget split the families along different axes:
//! compliance treats availability and error rate as higher-is-better, while
//! the budget rule only treats error rate as a ceiling. Both axes hang off
//! [`SloKind`] so the difference stays explicit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way an observation has to move, relative to its target, to count as
/// compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How the remaining error budget is derived from target and actual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRule {
    /// `target - actual`: allowance left before a ceiling is breached.
    Headroom,
    /// `actual - target`: how far the actual value sits above its target.
    Surplus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SloKind {
    Availability,
    ErrorRate,
    Latency,
}

impl SloKind {
    /// Infers the kind from a conventional SLO name. Anything that is not
    /// `availability` or `error_rate` is treated as a latency-style SLO.
    pub fn from_name(name: &str) -> Self {
        match name {
            crate::AVAILABILITY => SloKind::Availability,
            crate::ERROR_RATE => SloKind::ErrorRate,
            _ => SloKind::Latency,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            SloKind::Availability | SloKind::ErrorRate => Direction::HigherIsBetter,
            SloKind::Latency => Direction::LowerIsBetter,
        }
    }

    pub fn budget_rule(&self) -> BudgetRule {
        match self {
            SloKind::ErrorRate => BudgetRule::Headroom,
            SloKind::Availability | SloKind::Latency => BudgetRule::Surplus,
        }
    }

    /// Compliance percentage in `[0, 100]`.
    ///
    /// A zero denominator saturates to 100 instead of dividing. NaN inputs
    /// yield 0.
    pub fn compliance(&self, target: f64, actual: f64) -> f64 {
        let (numerator, denominator) = match self.direction() {
            Direction::HigherIsBetter => (actual, target),
            Direction::LowerIsBetter => (target, actual),
        };

        if denominator == 0.0 {
            return 100.0;
        }

        let compliance = (numerator / denominator) * 100.0;
        if compliance.is_nan() {
            return 0.0;
        }
        compliance.clamp(0.0, 100.0)
    }

    /// Remaining error budget, never negative.
    pub fn error_budget(&self, target: f64, actual: f64) -> f64 {
        let budget = match self.budget_rule() {
            BudgetRule::Headroom => target - actual,
            BudgetRule::Surplus => actual - target,
        };

        if budget.is_nan() {
            return 0.0;
        }
        budget.max(0.0)
    }

    /// Whether the actual value satisfies the target: availability must
    /// reach it, error rate and latency must stay at or below it. NaN never
    /// meets a target.
    pub fn is_met(&self, target: f64, actual: f64) -> bool {
        match self {
            SloKind::Availability => actual >= target,
            SloKind::ErrorRate | SloKind::Latency => actual <= target,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SloKind::Availability => "availability",
            SloKind::ErrorRate => "error_rate",
            SloKind::Latency => "latency",
        }
    }
}

impl fmt::Display for SloKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(SloKind::from_name("availability"), SloKind::Availability);
        assert_eq!(SloKind::from_name("error_rate"), SloKind::ErrorRate);
        assert_eq!(SloKind::from_name("latency_p99"), SloKind::Latency);
        assert_eq!(SloKind::from_name("checkout_p95"), SloKind::Latency);
    }

    #[test]
    fn test_axes_diverge_for_availability() {
        // Availability is higher-is-better for compliance but its budget is
        // a surplus, not a headroom.
        assert_eq!(SloKind::Availability.direction(), Direction::HigherIsBetter);
        assert_eq!(SloKind::Availability.budget_rule(), BudgetRule::Surplus);
        assert_eq!(SloKind::ErrorRate.direction(), Direction::HigherIsBetter);
        assert_eq!(SloKind::ErrorRate.budget_rule(), BudgetRule::Headroom);
        assert_eq!(SloKind::Latency.direction(), Direction::LowerIsBetter);
        assert_eq!(SloKind::Latency.budget_rule(), BudgetRule::Surplus);
    }

    #[test]
    fn test_compliance_clamps_to_hundred() {
        assert_eq!(SloKind::Availability.compliance(0.999, 0.9995), 100.0);
    }

    #[test]
    fn test_compliance_partial() {
        let compliance = SloKind::Availability.compliance(0.999, 0.5);
        assert!((compliance - 50.05005005005005).abs() < 1e-9);

        let compliance = SloKind::Latency.compliance(0.1, 0.2);
        assert!((compliance - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_saturates() {
        assert_eq!(SloKind::Latency.compliance(0.1, 0.0), 100.0);
        assert_eq!(SloKind::Availability.compliance(0.0, 0.5), 100.0);
        assert_eq!(SloKind::Latency.compliance(0.0, 0.0), 100.0);
    }

    #[test]
    fn test_error_budget_rules() {
        let budget = SloKind::ErrorRate.error_budget(0.001, 0.0005);
        assert!((budget - 0.0005).abs() < 1e-12);

        let budget = SloKind::Latency.error_budget(0.1, 0.2);
        assert!((budget - 0.1).abs() < 1e-12);

        assert_eq!(SloKind::ErrorRate.error_budget(0.001, 0.01), 0.0);
        assert_eq!(SloKind::Availability.error_budget(0.999, 0.5), 0.0);
    }

    #[test]
    fn test_nan_inputs_collapse_to_zero() {
        assert_eq!(SloKind::Availability.compliance(0.999, f64::NAN), 0.0);
        assert_eq!(SloKind::Latency.error_budget(0.1, f64::NAN), 0.0);
    }

    #[test]
    fn test_is_met_compares_against_target() {
        // Error-rate compliance reads 0 for a perfect service, so the verdict
        // cannot come from compliance.
        assert_eq!(SloKind::ErrorRate.compliance(0.001, 0.0), 0.0);
        assert!(SloKind::ErrorRate.is_met(0.001, 0.0));
        assert!(!SloKind::ErrorRate.is_met(0.001, 0.05));

        assert!(SloKind::Availability.is_met(0.999, 0.9995));
        assert!(!SloKind::Availability.is_met(0.999, 0.5));
        assert!(SloKind::Latency.is_met(0.1, 0.1));
        assert!(!SloKind::Latency.is_met(0.1, 0.2));
        assert!(!SloKind::Latency.is_met(0.1, f64::NAN));
    }

    fn any_kind() -> impl Strategy<Value = SloKind> {
        prop_oneof![
            Just(SloKind::Availability),
            Just(SloKind::ErrorRate),
            Just(SloKind::Latency),
        ]
    }

    proptest! {
        #[test]
        fn compliance_stays_in_range(
            kind in any_kind(),
            target in -10.0f64..10.0,
            actual in -10.0f64..10.0,
        ) {
            let compliance = kind.compliance(target, actual);
            prop_assert!((0.0..=100.0).contains(&compliance));
        }

        #[test]
        fn error_budget_is_non_negative(
            kind in any_kind(),
            target in -10.0f64..10.0,
            actual in -10.0f64..10.0,
        ) {
            prop_assert!(kind.error_budget(target, actual) >= 0.0);
        }
    }
}
