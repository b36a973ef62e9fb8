//! Taskify - task and appointment manager CLI
//!
#![doc = "Main entry point for the Taskify command-line client."]

use anyhow::Result;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskify::cli::Cli;
use taskify::commands;
use taskify::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.log_json);

    // Load configuration
    let config = Config::load(cli.config_path(), &cli)?;

    // Validate configuration
    config.validate()?;
    tracing::debug!("Using API at {}", config.api.base_url);

    commands::run(config, cli).await
}

/// Initialize tracing; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose { "taskify=debug" } else { "taskify=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
