use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("demos")
        .join(name)
}

fn slo() -> Command {
    Command::cargo_bin("slo").unwrap()
}

#[test]
fn validate_accepts_demo_configs() {
    slo()
        .args(["validate"])
        .arg(demo("slo.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid!"))
        .stdout(predicate::str::contains("Service: example-service"));

    slo()
        .args(["validate"])
        .arg(demo("slo.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("checkout_p95"));
}

#[test]
fn validate_rejects_empty_config() {
    let path = std::env::temp_dir().join(format!("slo-cli-empty-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "service": "svc", "slos": {} }"#).unwrap();

    slo()
        .args(["validate"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Config is invalid!"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn evaluate_renders_json() {
    let output = slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "availability=0.9995"])
        .args(["--actual", "latency_p99=0.2"])
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["service"], "example-service");
    assert_eq!(report["statuses"][0]["slo_name"], "availability");
    assert_eq!(report["statuses"][0]["compliance"], 100.0);
    assert_eq!(report["statuses"][1]["compliance"], 50.0);
}

#[test]
fn evaluate_renders_prometheus_text() {
    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "error_rate=0.0005", "--format", "prometheus"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"slo_budget_remaining{service="example-service",slo_name="error_rate"} 0.0005"#,
        ));
}

#[test]
fn evaluate_fails_on_breach_when_asked() {
    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "latency_p99=0.2", "--fail-on-breach"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 objectives not met"));
}

#[test]
fn evaluate_rejects_malformed_actual() {
    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "availability"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}

#[test]
fn list_prints_catalog() {
    slo()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("slo_compliance"))
        .stdout(predicate::str::contains("service, slo_name"));
}

#[test]
fn evaluate_passes_healthy_error_rate() {
    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "error_rate=0.0", "--fail-on-breach"])
        .assert()
        .success();

    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "error_rate=0.05", "--fail-on-breach"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 objectives not met"));
}

#[test]
fn evaluate_writes_markdown_to_output_file() {
    let path = std::env::temp_dir().join(format!("slo-cli-report-{}.md", std::process::id()));

    slo()
        .args(["evaluate"])
        .arg(demo("slo.yaml"))
        .args(["--actual", "latency_p99=0.05", "--format", "markdown", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let markdown = std::fs::read_to_string(&path).unwrap();
    assert!(markdown.starts_with("# SLO Report: example-service"));
    assert!(markdown.contains("| latency_p99 | latency | 0.1 |"));

    std::fs::remove_file(&path).unwrap();
}
