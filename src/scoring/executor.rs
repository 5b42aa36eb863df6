// Scoring executor
// Runs every scorer of a pipeline against one (query, document) pair on a
// bounded worker pool, each invocation under its own deadline.

use crate::config::ExecutorConfig;
use crate::observability::{self, Metrics};
use crate::plugin::error::{PluginError, ScoreError};
use crate::plugin::types::{Record, Scorer};
use crate::scoring::assembler::{self, FeatureVector};
use crate::scoring::ScoringPipeline;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn, Instrument};

/// Bounded, deadline-enforcing scorer executor.
///
/// The worker pool is a semaphore shared by every request scored through this
/// executor. When it is saturated, invocations wait for a permit.
///
/// A timeout cancels the caller's wait, not the scorer: a synchronous scorer
/// keeps running on its blocking thread and holds its permit until it
/// returns.
#[derive(Clone)]
pub struct Executor {
    pool: Arc<Semaphore>,
    max_workers: usize,
    timeout: Duration,
    metrics: Arc<Metrics>,
}

impl Executor {
    /// Create an executor with `max_workers` permits and a default deadline
    pub fn new(max_workers: usize, timeout: Duration) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            pool: Arc::new(Semaphore::new(max_workers)),
            max_workers,
            timeout,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new(config.max_workers, config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Score a pair with the executor's default deadline
    pub async fn score(
        &self,
        pipeline: &ScoringPipeline,
        query: &Record,
        document: &Record,
    ) -> Result<FeatureVector, ScoreError> {
        self.score_with_timeout(pipeline, query, document, self.timeout)
            .await
    }

    /// Score a pair, bounding each scorer invocation by `per_call_timeout`.
    ///
    /// All invocations are dispatched at once and awaited together. If any
    /// fail, the failure of the earliest scorer in column order is returned.
    pub async fn score_with_timeout(
        &self,
        pipeline: &ScoringPipeline,
        query: &Record,
        document: &Record,
        per_call_timeout: Duration,
    ) -> Result<FeatureVector, ScoreError> {
        let request_id = observability::generate_request_id();
        let span = tracing::debug_span!("score", request_id = %request_id, scorers = pipeline.len());

        async {
            self.metrics.inc_requests_total();
            let started = Instant::now();

            let query = Arc::new(query.clone());
            let document = Arc::new(document.clone());
            let invocations = pipeline.iter().map(|scorer| {
                self.invoke(scorer, Arc::clone(&query), Arc::clone(&document), per_call_timeout)
            });
            let results = join_all(invocations).await;

            let vector = assembler::assemble(results);
            match &vector {
                Ok(v) => debug!("Scored {} features in {:?}", v.len(), started.elapsed()),
                Err(e) => {
                    self.metrics.inc_request_failures();
                    warn!("Scoring request failed: {}", e);
                }
            }
            vector
        }
        .instrument(span)
        .await
    }

    /// Run one scorer on the pool, bounded by `timeout` from dispatch
    async fn invoke(
        &self,
        scorer: Scorer,
        query: Arc<Record>,
        document: Arc<Record>,
        timeout: Duration,
    ) -> Result<f64, ScoreError> {
        let descriptor = scorer.descriptor().clone();
        let pool = Arc::clone(&self.pool);
        let metrics = Arc::clone(&self.metrics);

        let run = async move {
            let permit = match pool.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Err(PluginError::Failed("worker pool closed".to_string())),
            };

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let _in_flight = InFlight::enter(&metrics);
                let started = Instant::now();
                let result = scorer.invoke(&query, &document);
                metrics.record_invocation_duration(started.elapsed().as_micros() as u64);
                result
            });

            match handle.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => Err(PluginError::Failed(format!(
                    "scorer panicked: {}",
                    panic_message(e.into_panic())
                ))),
                Err(e) => Err(PluginError::Failed(e.to_string())),
            }
        };

        match tokio::time::timeout(timeout, run).await {
            Ok(Ok(score)) => Ok(score),
            Ok(Err(source)) => {
                self.metrics.inc_runtime_failures();
                warn!("Scorer '{}' failed: {}", descriptor.short_name(), source);
                Err(ScoreError::Runtime {
                    scorer: descriptor,
                    source,
                })
            }
            Err(_) => {
                self.metrics.inc_timeouts();
                warn!(
                    "Scorer '{}' timed out after {:?}",
                    descriptor.short_name(),
                    timeout
                );
                Err(ScoreError::Timeout {
                    scorer: descriptor,
                    timeout,
                })
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::from_config(&ExecutorConfig::default())
    }
}

/// In-flight gauge guard; released even if the scorer panics
struct InFlight<'a>(&'a Metrics);

impl<'a> InFlight<'a> {
    fn enter(metrics: &'a Metrics) -> Self {
        metrics.inc_invocations_in_flight();
        Self(metrics)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.dec_invocations_in_flight();
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
