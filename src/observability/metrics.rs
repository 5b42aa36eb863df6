// Scoring metrics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for the scoring executor
#[derive(Clone)]
pub struct Metrics {
    // Request metrics
    requests_total: Arc<AtomicU64>,
    request_failures: Arc<AtomicU64>,

    // Invocation metrics
    invocations_total: Arc<AtomicU64>,
    invocations_in_flight: Arc<AtomicU64>,
    invocations_peak: Arc<AtomicU64>,
    invocation_duration_sum: Arc<AtomicU64>,
    invocation_duration_count: Arc<AtomicU64>,

    // Error metrics
    runtime_failures: Arc<AtomicU64>,
    timeouts_total: Arc<AtomicU64>,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub request_failures: u64,
    pub invocations_total: u64,
    pub invocations_in_flight: u64,
    pub invocations_peak: u64,
    pub runtime_failures: u64,
    pub timeouts_total: u64,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            requests_total: Arc::new(AtomicU64::new(0)),
            request_failures: Arc::new(AtomicU64::new(0)),
            invocations_total: Arc::new(AtomicU64::new(0)),
            invocations_in_flight: Arc::new(AtomicU64::new(0)),
            invocations_peak: Arc::new(AtomicU64::new(0)),
            invocation_duration_sum: Arc::new(AtomicU64::new(0)),
            invocation_duration_count: Arc::new(AtomicU64::new(0)),
            runtime_failures: Arc::new(AtomicU64::new(0)),
            timeouts_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Increment total requests counter
    pub fn inc_requests_total(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment failed requests counter
    pub fn inc_request_failures(&self) {
        self.request_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Mark an invocation as started on a worker
    pub fn inc_invocations_in_flight(&self) {
        self.invocations_total.fetch_add(1, Ordering::Relaxed);
        let now = self.invocations_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.invocations_peak.fetch_max(now, Ordering::SeqCst);
    }

    /// Mark an invocation as finished on its worker
    pub fn dec_invocations_in_flight(&self) {
        self.invocations_in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Record invocation duration (in microseconds)
    pub fn record_invocation_duration(&self, duration_us: u64) {
        self.invocation_duration_sum.fetch_add(duration_us, Ordering::Relaxed);
        self.invocation_duration_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get invocation duration average in microseconds
    pub fn get_invocation_duration_avg_us(&self) -> f64 {
        let sum = self.invocation_duration_sum.load(Ordering::Relaxed);
        let count = self.invocation_duration_count.load(Ordering::Relaxed);
        if count > 0 {
            sum as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Increment runtime failure counter
    pub fn inc_runtime_failures(&self) {
        self.runtime_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment timeout counter
    pub fn inc_timeouts(&self) {
        self.timeouts_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn get_request_failures(&self) -> u64 {
        self.request_failures.load(Ordering::Relaxed)
    }

    pub fn get_invocations_total(&self) -> u64 {
        self.invocations_total.load(Ordering::Relaxed)
    }

    pub fn get_invocations_in_flight(&self) -> u64 {
        self.invocations_in_flight.load(Ordering::SeqCst)
    }

    pub fn get_invocations_peak(&self) -> u64 {
        self.invocations_peak.load(Ordering::SeqCst)
    }

    pub fn get_runtime_failures(&self) -> u64 {
        self.runtime_failures.load(Ordering::Relaxed)
    }

    pub fn get_timeouts_total(&self) -> u64 {
        self.timeouts_total.load(Ordering::Relaxed)
    }

    /// Get current values
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.get_requests_total(),
            request_failures: self.get_request_failures(),
            invocations_total: self.get_invocations_total(),
            invocations_in_flight: self.get_invocations_in_flight(),
            invocations_peak: self.get_invocations_peak(),
            runtime_failures: self.get_runtime_failures(),
            timeouts_total: self.get_timeouts_total(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_tracks_peak() {
        let metrics = Metrics::new();
        metrics.inc_invocations_in_flight();
        metrics.inc_invocations_in_flight();
        metrics.dec_invocations_in_flight();
        metrics.inc_invocations_in_flight();
        metrics.dec_invocations_in_flight();
        metrics.dec_invocations_in_flight();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.invocations_total, 3);
        assert_eq!(snapshot.invocations_in_flight, 0);
        assert_eq!(snapshot.invocations_peak, 2);
    }

    #[test]
    fn test_duration_average() {
        let metrics = Metrics::default();
        assert_eq!(metrics.get_invocation_duration_avg_us(), 0.0);
        metrics.record_invocation_duration(100);
        metrics.record_invocation_duration(300);
        assert_eq!(metrics.get_invocation_duration_avg_us(), 200.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let other = metrics.clone();
        other.inc_timeouts();
        other.inc_requests_total();
        assert_eq!(metrics.get_timeouts_total(), 1);
        assert_eq!(metrics.get_requests_total(), 1);
    }
}
