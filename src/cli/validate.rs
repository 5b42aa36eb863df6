use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::formatter::Format;
use crate::plugin::{self, Registry};
use anyhow::{Context, Result};

/// Handle validate command - load the pipeline and list its scorers
pub fn handle(cmd: &ValidateArgs, config: &Config, registry: &Registry) -> Result<()> {
    let pipeline = plugin::load(&config.scorers_path, registry).with_context(|| {
        format!(
            "Invalid scorer pipeline: {}",
            config.scorers_path.display()
        )
    })?;

    let scorers: Vec<_> = pipeline
        .iter()
        .map(|scorer| (scorer.kind(), scorer.descriptor().clone()))
        .collect();

    let format = Format::from_string(&cmd.format.format);
    format.write_scorers(&mut std::io::stdout().lock(), &scorers)?;

    if format == Format::Cli {
        println!("\n{} scorers OK", pipeline.len());
    }

    Ok(())
}
