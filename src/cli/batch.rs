use crate::cli::BatchArgs;
use crate::config::Config;
use crate::formatter::{Format, ScoredRow};
use crate::plugin::{Record, Registry};
use crate::scoring::Scorers;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use std::path::Path;

/// One line of a batch input file
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub query: Record,
    #[serde(default)]
    pub document: Record,
}

/// Handle batch command - score every pair in an NDJSON file
pub fn handle(cmd: &BatchArgs, config: &Config, registry: &Registry) -> Result<()> {
    let items = read_items(&cmd.input)?;
    let scorers = Scorers::from_config(config, registry).context("Failed to load scorer pipeline")?;

    // Keep at most one request per worker queued at a time
    let concurrency = scorers.executor().max_workers();

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        stream::iter(items.into_iter().map(|(line, item)| {
            let scorers = &scorers;
            async move {
                let vector = scorers
                    .score(&item.query, &item.document)
                    .await
                    .with_context(|| format!("line {}", line))?;
                Ok::<_, anyhow::Error>(ScoredRow { id: item.id, vector })
            }
        }))
        .buffered(concurrency)
        .try_collect::<Vec<_>>()
        .await
    });
    rt.shutdown_background();

    let rows = result?;
    log::info!("Scored {} rows", rows.len());

    let format = Format::from_string(&cmd.format.format);
    format.write_vectors(&mut std::io::stdout().lock(), &scorers.headers(), &rows)?;

    if cmd.stats {
        let stats = scorers.metrics().snapshot();
        eprintln!("requests:      {}", stats.requests_total);
        eprintln!("failures:      {}", stats.request_failures);
        eprintln!("invocations:   {}", stats.invocations_total);
        eprintln!("peak parallel: {}", stats.invocations_peak);
        eprintln!("timeouts:      {}", stats.timeouts_total);
        eprintln!(
            "avg scorer:    {:.1}us",
            scorers.metrics().get_invocation_duration_avg_us()
        );
    }

    Ok(())
}

/// Read batch items, tagged with their 1-based line number. Blank lines are skipped.
pub fn read_items(path: &Path) -> Result<Vec<(usize, BatchItem)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
    parse_items(&content)
}

pub fn parse_items(content: &str) -> Result<Vec<(usize, BatchItem)>> {
    let mut items = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item: BatchItem =
            serde_json::from_str(line).with_context(|| format!("Malformed batch line {}", i + 1))?;
        items.push((i + 1, item));
    }
    Ok(items)
}
