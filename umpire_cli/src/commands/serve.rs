use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use umpire_config::load_config;

pub async fn execute(config_file: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    println!("{}", "=== Umpire ===".bold().cyan());

    let mut config = load_config(config_file.as_deref()).await?;

    if let Some(port) = port {
        config.server.port = port;
        info!("Overriding listen port: {}", port);
    }

    println!("  Listening on: {}", config.bind_address().green());
    println!(
        "  Backend timeout: {}",
        humantime::format_duration(config.backend_timeout)
    );
    if config.server.force_https {
        println!("  HTTPS: {}", "enforced".yellow());
    }

    umpire_server::serve(config).await
}
