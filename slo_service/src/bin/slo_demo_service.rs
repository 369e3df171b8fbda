use clap::Parser;
use slo_core::{parse_config_from_file, TrackerConfig};
use slo_service::{router, shutdown_on, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slo_demo_service")]
#[command(about = "Example HTTP service with SLO tracking middleware", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "SLO_ADDR", default_value = "0.0.0.0:8080")]
    addr: String,

    /// SLO config file (YAML, TOML, or JSON); built-in targets when omitted
    #[arg(short, long, env = "SLO_CONFIG")]
    config: Option<PathBuf>,

    /// Service name used when no config file is given
    #[arg(long, env = "SLO_SERVICE", default_value = "example-service")]
    service: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => parse_config_from_file(path).await?,
        None => TrackerConfig::example(args.service.clone()),
    };

    info!(
        "Tracking {} SLOs for service '{}'",
        config.slos.len(),
        config.service
    );
    for (name, slo) in &config.slos {
        info!(
            "  {:<14} target {} over {}",
            name,
            slo.target,
            humantime::format_duration(slo.window)
        );
    }

    let state = AppState::new(config)?;
    let app = router(state.clone());

    info!("Starting SLO demo service on {}", args.addr);
    info!("Endpoints:");
    info!("  GET  /health          - Health check");
    info!("  GET  /ready           - Readiness check");
    info!("  GET  /metrics         - Prometheus metrics");
    info!("  GET  /slo             - Trailing-window SLO report");
    info!("  GET  /api/data        - Example read endpoint");
    info!("  POST /api/process     - Example processing endpoint");

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(state, ctrl_c()))
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
