//! Garcom - guided dining-suggestion assistant CLI
//!
//! Main entry point for the Garcom application.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use garcom::cli::{Cli, Commands};
use garcom::commands;
use garcom::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(|| "config/config.yaml".to_string());
    let config = Config::load(&config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat => {
            tracing::info!("starting guided conversation");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Menu { json } => {
            tracing::info!("listing restaurant menu");
            commands::menu::run_menu(&config, json).await?;
            Ok(())
        }
        Commands::Stats { json } => {
            commands::stats::run_stats(json)?;
            Ok(())
        }
        Commands::Validate => {
            commands::validate::run_validate()?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "garcom=debug" } else { "garcom=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
