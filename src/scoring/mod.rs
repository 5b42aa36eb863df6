// Scoring pipeline: loaded scorers, executor and feature vector assembly

pub mod assembler;
pub mod executor;
pub mod pipeline;

pub use assembler::{assemble, headers, FeatureVector};
pub use executor::Executor;
pub use pipeline::ScoringPipeline;

use crate::config::Config;
use crate::observability::Metrics;
use crate::plugin::error::{ConfigError, ScoreError};
use crate::plugin::loader;
use crate::plugin::registry::Registry;
use crate::plugin::types::Record;
use log::info;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Live scoring pipeline plus the executor that runs it.
///
/// The pipeline is immutable once loaded. Reconfiguring builds a new one and
/// swaps it in; requests already running finish on the pipeline they started
/// with.
pub struct Scorers {
    pipeline: RwLock<Arc<ScoringPipeline>>,
    executor: Executor,
}

impl Scorers {
    pub fn new(pipeline: ScoringPipeline, executor: Executor) -> Self {
        Self {
            pipeline: RwLock::new(Arc::new(pipeline)),
            executor,
        }
    }

    /// Load the pipeline named by `config.scorers_path`
    pub fn from_config(config: &Config, registry: &Registry) -> Result<Self, ConfigError> {
        let pipeline = loader::load(&config.scorers_path, registry)?;
        Ok(Self::new(pipeline, Executor::from_config(&config.executor)))
    }

    /// The pipeline currently in use
    pub fn snapshot(&self) -> Arc<ScoringPipeline> {
        let guard = self.pipeline.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn headers(&self) -> Vec<String> {
        self.snapshot().headers()
    }

    pub fn required_fields(&self) -> BTreeSet<String> {
        self.snapshot().required_fields()
    }

    /// Score one (query, document) pair with every scorer
    pub async fn score(&self, query: &Record, document: &Record) -> Result<FeatureVector, ScoreError> {
        let pipeline = self.snapshot();
        self.executor.score(&pipeline, query, document).await
    }

    /// Swap in a new pipeline, returning the one it replaced
    pub fn replace(&self, pipeline: ScoringPipeline) -> Arc<ScoringPipeline> {
        let mut guard = self.pipeline.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(pipeline))
    }

    /// Rebuild the pipeline from `path`. On failure the current one stays.
    pub fn reload(&self, path: impl AsRef<Path>, registry: &Registry) -> Result<(), ConfigError> {
        let pipeline = loader::load(path, registry)?;
        let headers = pipeline.headers();
        self.replace(pipeline);
        info!("Scorer pipeline reloaded: {:?}", headers);
        Ok(())
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn metrics(&self) -> &Metrics {
        self.executor.metrics()
    }
}
