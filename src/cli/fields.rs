use crate::config::Config;
use crate::plugin::{self, Registry};
use anyhow::{Context, Result};

/// Handle fields command - print the input fields scorers declare
pub fn handle(config: &Config, registry: &Registry) -> Result<()> {
    let pipeline = plugin::load(&config.scorers_path, registry)
        .context("Failed to load scorer pipeline")?;

    for field in pipeline.required_fields() {
        println!("{}", field);
    }

    Ok(())
}
