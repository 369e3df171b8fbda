mod commands;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "slo")]
#[command(about = "Evaluate service level objectives and error budgets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an SLO config file
    Validate {
        /// Path to config file (YAML, TOML, or JSON)
        config_file: PathBuf,
    },

    /// Evaluate actual values against the configured objectives
    Evaluate {
        /// Path to config file (YAML, TOML, or JSON)
        config_file: PathBuf,

        /// Observed value for an SLO, as name=value (repeatable)
        #[arg(short, long = "actual", value_parser = commands::evaluate::parse_actual, required = true)]
        actuals: Vec<(String, f64)>,

        /// Output format (cli, json, markdown, prometheus)
        #[arg(short, long, default_value = "cli")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with an error when any objective is not met
        #[arg(long)]
        fail_on_breach: bool,
    },

    /// List the metric families emitted by the tracker
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { config_file } => {
            commands::validate::execute(config_file).await?;
        }

        Commands::Evaluate {
            config_file,
            actuals,
            format,
            output,
            fail_on_breach,
        } => {
            commands::evaluate::execute(config_file, actuals, format, output, fail_on_breach)
                .await?;
        }

        Commands::List => {
            commands::list::execute().await?;
        }
    }

    Ok(())
}
