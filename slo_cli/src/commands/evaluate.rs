use crate::ui;
use anyhow::Result;
use colored::Colorize;
use slo_core::parse_config_from_file;
use slo_metrics::exporters::{JsonExporter, MarkdownExporter, PrometheusExporter};
use slo_metrics::{PrometheusSink, SloReport, SloTracker};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "SLO")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Target")]
    target: f64,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Actual")]
    actual: f64,
    #[tabled(rename = "Compliance")]
    compliance: String,
    #[tabled(rename = "Budget Remaining")]
    budget: f64,
    #[tabled(rename = "Met")]
    met: &'static str,
}

/// Parses `name=value` pairs given on the command line.
pub fn parse_actual(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing SLO name in '{}'", s));
    }

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value in '{}': {}", s, e))?;

    Ok((name.to_string(), value))
}

pub async fn execute(
    config_file: PathBuf,
    actuals: Vec<(String, f64)>,
    format: String,
    output: Option<PathBuf>,
    fail_on_breach: bool,
) -> Result<()> {
    let config = parse_config_from_file(&config_file).await?;

    for (name, _) in &actuals {
        if !config.slos.contains_key(name) {
            warn!("'{}' is not defined in {}, skipping", name, config_file.display());
        }
    }

    let sink = Arc::new(PrometheusSink::new()?);
    let tracker = SloTracker::from_config(config, sink.clone());
    let report = tracker.evaluate(actuals.iter().map(|(name, value)| (name.as_str(), *value)));

    match (format.as_str(), output) {
        ("cli", _) => print_cli_report(&report),
        ("json", Some(path)) => {
            JsonExporter::export(&report, &path).await?;
            print_written(&path);
        }
        ("json", None) => println!("{}", JsonExporter::to_string(&report)?),
        ("markdown", Some(path)) => {
            MarkdownExporter::export(&report, &path).await?;
            print_written(&path);
        }
        ("markdown", None) => println!("{}", MarkdownExporter::format(&report)),
        ("prometheus", Some(path)) => {
            PrometheusExporter::export(&sink, &path).await?;
            print_written(&path);
        }
        ("prometheus", None) => println!("{}", PrometheusExporter::format(&sink)?),
        (other, _) => anyhow::bail!("Unknown format: {}", other),
    }

    if fail_on_breach && !report.all_met() {
        anyhow::bail!(
            "{} of {} objectives not met",
            report.statuses.len() - report.met_count(),
            report.statuses.len()
        );
    }

    Ok(())
}

fn print_written(path: &Path) {
    println!("Report written to {}", path.display());
}

fn print_cli_report(report: &SloReport) {
    ui::print_header(&format!("SLO Report: {}", report.service));

    let rows = report.statuses.iter().map(|s| StatusRow {
        name: s.slo_name.clone(),
        kind: s.kind.to_string(),
        target: s.target,
        window: s.window_display(),
        actual: s.actual,
        compliance: format!("{:.2}%", s.compliance),
        budget: s.budget_remaining,
        met: if s.is_met() { "yes" } else { "no" },
    });

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "\nObjectives met: {} of {} (average compliance {})",
        report.met_count(),
        report.statuses.len(),
        format!("{:.2}%", report.average_compliance()).bold()
    );

    if report.statuses.is_empty() {
        ui::print_warning("No supplied values matched a configured SLO");
    } else if report.all_met() {
        ui::print_success("All objectives met");
    } else {
        ui::print_error("Some objectives are not met");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actual() {
        assert_eq!(
            parse_actual("availability=0.9995").unwrap(),
            ("availability".to_string(), 0.9995)
        );
        assert_eq!(
            parse_actual(" latency_p99 = 0.2 ").unwrap(),
            ("latency_p99".to_string(), 0.2)
        );
        assert!(parse_actual("availability").is_err());
        assert!(parse_actual("=0.5").is_err());
        assert!(parse_actual("availability=fast").is_err());
    }
}
