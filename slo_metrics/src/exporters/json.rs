use crate::error::Result;
use crate::report::SloReport;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    pub async fn export(report: &SloReport, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn to_string(report: &SloReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SloStatus;
    use slo_core::SloKind;

    #[test]
    fn test_json_shape() {
        let report = SloReport::new(
            "svc",
            vec![SloStatus {
                slo_name: "error_rate".to_string(),
                kind: SloKind::ErrorRate,
                target: 0.001,
                window_secs: 604_800,
                actual: 0.0005,
                compliance: 50.0,
                budget_remaining: 0.0005,
                met: true,
            }],
        );

        let json = JsonExporter::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["service"], "svc");
        assert_eq!(value["statuses"][0]["kind"], "error_rate");
        assert_eq!(value["statuses"][0]["window_secs"], 604_800);
        assert_eq!(value["statuses"][0]["met"], true);
    }
}
