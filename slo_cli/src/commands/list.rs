use crate::ui;
use anyhow::Result;
use slo_metrics::{FamilyKind, CATALOG};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FamilyRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Labels")]
    labels: String,
    #[tabled(rename = "Help")]
    help: &'static str,
}

pub async fn execute() -> Result<()> {
    ui::print_header("Metric Families");

    let rows = CATALOG.iter().map(|family| FamilyRow {
        name: family.name,
        kind: match family.kind {
            FamilyKind::Gauge => "gauge".to_string(),
            FamilyKind::Histogram { buckets } => format!("histogram {:?}", buckets),
        },
        labels: family.labels.join(", "),
        help: family.help,
    });

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
