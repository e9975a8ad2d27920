use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use umpire_config::parse_config_from_file;

pub async fn execute(config_file: PathBuf) -> Result<()> {
    println!("{}", "=== Validating Configuration ===".bold().cyan());
    println!("File: {}", config_file.display());

    let checked = async {
        let mut config = parse_config_from_file(&config_file).await?;
        config.apply_env()?;
        config.validate()?;
        anyhow::Ok(config)
    }
    .await;

    match checked {
        Ok(config) => {
            println!("\n{}", "✓ Configuration is valid!".green().bold());
            println!("\nConfiguration Details:");
            println!("  Listen: {}", config.bind_address());
            println!("  Force HTTPS: {}", config.server.force_https);
            println!(
                "  Graphite: {}",
                config.graphite.url.as_deref().unwrap_or("-")
            );
            println!(
                "  Backend timeout: {}",
                humantime::format_duration(config.backend_timeout)
            );

            match config.librato.credentials() {
                Some(credentials) => {
                    println!("  Librato: {} ({})", config.librato.url, credentials.email)
                }
                None => println!(
                    "\n{}",
                    "⚠ Warning: Librato is not configured; backend=librato checks will return 503"
                        .yellow()
                ),
            }

            Ok(())
        }
        Err(e) => {
            println!("\n{}", "✗ Configuration is invalid!".red().bold());
            println!("\nError: {}", e);
            Err(e)
        }
    }
}
