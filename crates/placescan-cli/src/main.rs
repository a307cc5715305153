use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod origins;
mod sink;
mod sweep;

#[derive(Debug, Parser)]
#[command(name = "placescan-cli")]
#[command(about = "Discover operational places around a center point")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the adaptive search, print the results, and save them as CSV
    Sweep {
        /// Write results here instead of `PLACESCAN_OUTPUT_PATH`
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print results without writing a file
        #[arg(long)]
        no_write: bool,
    },
    /// Print the search origins for an expansion level without calling the API
    Origins {
        #[arg(long, default_value_t = 2)]
        level: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Sweep {
        output: None,
        no_write: false,
    });

    match command {
        Commands::Sweep { output, no_write } => {
            let config = placescan_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let target = if no_write {
                None
            } else {
                Some(output.unwrap_or_else(|| config.output_path.clone()))
            };
            let run = sweep::run_sweep(&config, target.as_deref()).await?;
            tracing::info!(
                records = run.report.records.len(),
                dropped_inactive = run.report.inactive,
                dropped_out_of_radius = run.report.out_of_radius,
                stop_reason = %run.stop_reason,
                written = ?run.written,
                "sweep finished"
            );
        }
        Commands::Origins { level } => {
            let settings = placescan_core::load_search_settings()?;
            init_tracing("info")?;
            origins::print_origins(&settings, level);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise fall back to `default_level`.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
