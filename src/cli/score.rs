use crate::cli::ScoreArgs;
use crate::config::Config;
use crate::formatter::{Format, ScoredRow};
use crate::plugin::{Record, Registry};
use crate::scoring::Scorers;
use anyhow::{Context, Result};

/// Handle score command - score one query/document pair
pub fn handle(cmd: &ScoreArgs, config: &Config, registry: &Registry) -> Result<()> {
    let query = parse_record(&cmd.query).context("Invalid --query")?;
    let document = parse_record(&cmd.document).context("Invalid --document")?;

    let scorers = Scorers::from_config(config, registry).context("Failed to load scorer pipeline")?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(scorers.score(&query, &document));
    // Timed-out scorers may still be running on blocking threads
    rt.shutdown_background();

    let vector = result?;
    let rows = vec![ScoredRow { id: None, vector }];

    let format = Format::from_string(&cmd.format.format);
    format.write_vectors(&mut std::io::stdout().lock(), &scorers.headers(), &rows)?;

    Ok(())
}

/// Parse a JSON object into a record
pub fn parse_record(raw: &str) -> Result<Record> {
    let record: Record = serde_json::from_str(raw)
        .with_context(|| format!("expected a JSON object, got: {}", raw))?;
    Ok(record)
}
