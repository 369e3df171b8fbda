use crate::error::Result;
use crate::report::SloReport;
use std::path::Path;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(report: &SloReport, path: impl AsRef<Path>) -> Result<()> {
        let markdown = Self::format(report);
        tokio::fs::write(path, markdown).await?;
        Ok(())
    }

    pub fn format(report: &SloReport) -> String {
        let rows = report
            .statuses
            .iter()
            .map(|s| {
                format!(
                    "| {} | {} | {} | {} | {} | {:.2}% | {} | {} |",
                    s.slo_name,
                    s.kind,
                    s.target,
                    s.window_display(),
                    s.actual,
                    s.compliance,
                    s.budget_remaining,
                    if s.is_met() { "yes" } else { "no" },
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"# SLO Report: {}

Generated at {}

## Objectives

| SLO | Kind | Target | Window | Actual | Compliance | Budget Remaining | Met |
|-----|------|--------|--------|--------|------------|------------------|-----|
{}

## Summary

- **Objectives met**: {} of {}
- **Average compliance**: {:.2}%
"#,
            report.service,
            report.generated_at.to_rfc3339(),
            rows,
            report.met_count(),
            report.statuses.len(),
            report.average_compliance(),
        )
    }
}
