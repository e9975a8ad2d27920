mod commands;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "umpire")]
#[command(about = "Metric threshold checks for load balancer and monitoring probes", long_about = None)]
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
    /// Run the HTTP check service
    Serve {
        /// Config file (YAML, TOML, or JSON); UMPIRE_* env vars override it
        #[arg(short, long, env = "UMPIRE_CONFIG")]
        config: Option<PathBuf>,

        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Evaluate a single check and exit non-zero unless it passes
    Check {
        /// Metric name
        #[arg(short, long)]
        metric: String,

        /// Lower bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        /// Upper bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        /// Window in seconds
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        range: u64,

        /// Backend (graphite or librato)
        #[arg(short, long, default_value = "graphite")]
        backend: String,

        /// Aggregation (avg, sum, min, max)
        #[arg(short, long)]
        aggregate: Option<String>,

        /// Treat an empty window as passing
        #[arg(long)]
        empty_ok: bool,

        /// Config file for backend settings
        #[arg(short, long, env = "UMPIRE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Validate {
        /// Path to config file
        config_file: PathBuf,
    },
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

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { config, port } => {
            commands::serve::execute(config, port).await?;
        }

        Commands::Check {
            metric,
            min,
            max,
            range,
            backend,
            aggregate,
            empty_ok,
            config,
        } => {
            let passed = commands::check::execute(
                commands::check::CheckArgs {
                    metric,
                    min,
                    max,
                    range,
                    backend,
                    aggregate,
                    empty_ok,
                },
                config,
            )
            .await?;

            if !passed {
                std::process::exit(1);
            }
        }

        Commands::Validate { config_file } => {
            commands::validate::execute(config_file).await?;
        }
    }

    Ok(())
}
