use crate::config::{TrackerConfig, TrackerDocument};
use crate::error::{Result, SloError};
use std::path::Path;
use tracing::debug;

pub async fn parse_config_from_file(path: impl AsRef<Path>) -> Result<TrackerConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());
    debug!("Loading SLO config from {}", path.display());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(SloError::UnsupportedFormat(format!(
            "{} (use .yaml, .yml, .toml, or .json)",
            path.display()
        ))),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<TrackerConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(SloError::UnsupportedFormat(format.to_string())),
    }
}

fn parse_yaml(content: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn parse_toml(content: &str) -> Result<TrackerConfig> {
    let document: TrackerDocument = toml::from_str(content)?;
    document.tracker.validate()?;
    Ok(document.tracker)
}

fn parse_json(content: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}
