use crate::cli::HeadersArgs;
use crate::config::Config;
use crate::formatter::Format;
use crate::plugin::{self, Registry};
use anyhow::{Context, Result};

/// Handle headers command - print feature vector columns in order
pub fn handle(cmd: &HeadersArgs, config: &Config, registry: &Registry) -> Result<()> {
    let pipeline = plugin::load(&config.scorers_path, registry)
        .context("Failed to load scorer pipeline")?;

    let format = Format::from_string(&cmd.format.format);
    format.write_headers(&mut std::io::stdout().lock(), &pipeline.headers())?;

    Ok(())
}
