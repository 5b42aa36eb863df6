// Observability for the scoring executor
// Provides metrics, logging setup, and request identifiers

pub mod metrics;
pub mod tracing_mod;

pub use metrics::{Metrics, MetricsSnapshot};
pub use tracing_mod::{generate_request_id, init_logging};
