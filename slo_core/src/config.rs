use crate::definition::SloDefinition;
use crate::error::{Result, SloError};
use crate::kind::SloKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub service: String,
    pub slos: BTreeMap<String, SloDefinition>,
}

/// TOML layout: the tracker lives under a `[tracker]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerDocument {
    pub tracker: TrackerConfig,
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// The definitions used by the demo service when no file is supplied.
    pub fn example(service: impl Into<String>) -> Self {
        Self::builder()
            .service(service)
            .slo(crate::AVAILABILITY, SloDefinition::days(0.999, 30))
            .slo(crate::LATENCY_P99, SloDefinition::days(0.1, 7))
            .slo(crate::ERROR_RATE, SloDefinition::days(0.001, 7))
            .build()
    }

    pub fn validate(&self) -> Result<()> {
        if self.service.is_empty() {
            return Err(SloError::InvalidConfig(
                "Service name cannot be empty".to_string(),
            ));
        }

        if self.slos.is_empty() {
            return Err(SloError::InvalidConfig(
                "At least one SLO must be defined".to_string(),
            ));
        }

        for (name, slo) in &self.slos {
            if name.is_empty() {
                return Err(SloError::InvalidConfig(
                    "SLO name cannot be empty".to_string(),
                ));
            }

            if !slo.target.is_finite() {
                return Err(SloError::InvalidConfig(format!(
                    "SLO '{}' target must be a finite number",
                    name
                )));
            }

            if slo.window.is_zero() {
                return Err(SloError::InvalidConfig(format!(
                    "SLO '{}' window must be > 0",
                    name
                )));
            }
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct TrackerConfigBuilder {
    service: Option<String>,
    slos: BTreeMap<String, SloDefinition>,
}

impl TrackerConfigBuilder {
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn slo(mut self, name: impl Into<String>, definition: SloDefinition) -> Self {
        self.slos.insert(name.into(), definition);
        self
    }

    pub fn slo_with_kind(
        self,
        name: impl Into<String>,
        kind: SloKind,
        target: f64,
        window: Duration,
    ) -> Self {
        self.slo(name, SloDefinition::new(target, window).with_kind(kind))
    }

    pub fn build(self) -> TrackerConfig {
        TrackerConfig {
            service: self.service.unwrap_or_else(|| "unnamed".to_string()),
            slos: self.slos,
        }
    }
}
