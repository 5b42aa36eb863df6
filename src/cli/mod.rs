use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// RR Scorers - ordered feature vectors from pluggable query/document scorers
#[derive(Parser, Debug)]
#[command(name = "rr-scorers")]
#[command(author = "RR Scorers Team")]
#[command(version = "0.1.0")]
#[command(about = "Compute feature vectors for query/document pairs with pluggable scorers", long_about = None)]
pub struct Cli {
    /// Application config file (yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Scorer pipeline file (json or yaml); overrides the config
    #[arg(long, global = true)]
    pub scorers: Option<PathBuf>,
    /// Per-scorer deadline in milliseconds; overrides the config
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
    /// Worker pool size; overrides the config
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref scorers) = self.scorers {
            config.scorers_path = scorers.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.executor.timeout_ms = timeout_ms;
        }
        if let Some(workers) = self.workers {
            config.executor.max_workers = workers;
        }
    }
}

// CLI submodule declarations
pub mod batch;
pub mod classes;
pub mod fields;
pub mod headers;
pub mod score;
pub mod validate;

/// Output format options
#[derive(Debug, Clone, Args)]
pub struct FormatOptions {
    /// Output format: cli, json, csv
    #[arg(long, default_value = "cli")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the feature vector column headers
    Headers(HeadersArgs),

    /// Print the fields the query and query/document scorers read
    Fields,

    /// Load the scorer pipeline and report each scorer
    Validate(ValidateArgs),

    /// List registered scorer classes
    Classes,

    /// Score one query/document pair
    Score(ScoreArgs),

    /// Score query/document pairs from an NDJSON file
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub format: FormatOptions,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub format: FormatOptions,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Query record as a JSON object, e.g. '{"q": "what is rust"}'
    #[arg(long, default_value = "{}")]
    pub query: String,
    /// Document record as a JSON object
    #[arg(long, default_value = "{}")]
    pub document: String,
    #[command(flatten)]
    pub format: FormatOptions,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// NDJSON file; one {"query": {...}, "document": {...}} object per line
    pub input: PathBuf,
    #[command(flatten)]
    pub format: FormatOptions,
    /// Print executor metrics to stderr when done
    #[arg(long)]
    pub stats: bool,
}
