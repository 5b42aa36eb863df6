use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rr_scorers::cli::{self, Cli, Commands};
use rr_scorers::config::Config;
use rr_scorers::observability;
use rr_scorers::plugin::Registry;

fn main() -> Result<()> {
    // Initialize logger
    observability::init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    info!("Configuration loaded successfully");
    info!("Scorer pipeline: {}", config.scorers_path.display());

    let registry = Registry::with_builtins().context("Failed to register built-in scorers")?;

    // Dispatch commands
    match &cli.command {
        Commands::Headers(cmd) => cli::headers::handle(cmd, &config, &registry)?,
        Commands::Fields => cli::fields::handle(&config, &registry)?,
        Commands::Validate(cmd) => cli::validate::handle(cmd, &config, &registry)?,
        Commands::Classes => cli::classes::handle(&registry)?,
        Commands::Score(cmd) => cli::score::handle(cmd, &config, &registry)?,
        Commands::Batch(cmd) => cli::batch::handle(cmd, &config, &registry)?,
    }

    Ok(())
}
