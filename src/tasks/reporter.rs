//! Metrics Reporter Task
//!
//! Background task that periodically logs a metrics snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::metrics::Metrics;

/// Interval used when none is configured.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns a background task that logs a metrics snapshot every `interval`.
///
/// The task runs until aborted. The first report is emitted one full
/// interval after start.
///
/// # Example
/// ```ignore
/// let metrics = Arc::new(Metrics::new());
/// let reporter = spawn_metrics_reporter(metrics.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_metrics_reporter(metrics: Arc<Metrics>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Periodical metrics reports activated every {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;
            debug!("Emitting periodic metrics report");
            metrics.snapshot().log("Counters");
        }
    })
}
