use crate::kind::SloKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloDefinition {
    pub target: f64,
    #[serde(with = "window_serde")]
    pub window: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SloKind>,
}

impl SloDefinition {
    pub fn new(target: f64, window: Duration) -> Self {
        Self {
            target,
            window,
            kind: None,
        }
    }

    /// Definition with a window expressed in whole days, the unit SLO
    /// documents usually use. Day counts too large to represent saturate to
    /// the longest window.
    pub fn days(target: f64, days: u64) -> Self {
        let window = days
            .checked_mul(window_serde::SECS_PER_DAY)
            .map_or(Duration::MAX, Duration::from_secs);
        Self::new(target, window)
    }

    pub fn with_kind(mut self, kind: SloKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Explicit kind if one was configured, otherwise the kind implied by the
    /// SLO name.
    pub fn kind_for(&self, slo_name: &str) -> SloKind {
        self.kind.unwrap_or_else(|| SloKind::from_name(slo_name))
    }
}

/// Windows are written either as a bare number of days (`30`) or as a
/// humantime string (`"7d"`, `"12h"`).
mod window_serde {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) const SECS_PER_DAY: u64 = 24 * 60 * 60;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawWindow {
        Days(u64),
        Text(String),
    }

    pub fn serialize<S>(window: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*window).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawWindow::deserialize(deserializer)? {
            RawWindow::Days(days) => days
                .checked_mul(SECS_PER_DAY)
                .map(Duration::from_secs)
                .ok_or_else(|| de::Error::custom(format!("window of {} days overflows", days))),
            RawWindow::Text(s) => humantime::parse_duration(&s).map_err(de::Error::custom),
        }
    }
}
