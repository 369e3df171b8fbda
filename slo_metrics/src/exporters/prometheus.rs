use crate::error::Result;
use crate::prometheus::PrometheusSink;
use std::path::Path;

pub struct PrometheusExporter;

impl PrometheusExporter {
    pub fn format(sink: &PrometheusSink) -> Result<String> {
        sink.encode()
    }

    pub async fn export(sink: &PrometheusSink, path: impl AsRef<Path>) -> Result<()> {
        let text = Self::format(sink)?;
        tokio::fs::write(path, text).await?;
        Ok(())
    }
}
