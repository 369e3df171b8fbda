use crate::ui;
use anyhow::Result;
use slo_core::parse_config_from_file;
use std::path::PathBuf;

pub async fn execute(config_file: PathBuf) -> Result<()> {
    ui::print_header("Validating SLO Config");
    println!("File: {}", config_file.display());

    match parse_config_from_file(&config_file).await {
        Ok(config) => {
            println!();
            ui::print_success("Config is valid!");
            println!("\nService: {}", config.service);
            println!("Objectives: {}", config.slos.len());

            for (name, slo) in &config.slos {
                let kind = slo.kind_for(name);
                println!("\n  {}", name);
                println!("    Kind: {} ({:?})", kind, kind.direction());
                println!("    Target: {}", slo.target);
                println!("    Window: {}", humantime::format_duration(slo.window));
                if slo.kind.is_none() {
                    println!("    (kind inferred from name)");
                }
            }

            Ok(())
        }
        Err(e) => {
            println!();
            ui::print_error("Config is invalid!");
            println!("\nError: {}", e);
            Err(e.into())
        }
    }
}
