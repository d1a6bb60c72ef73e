use std::sync::Arc;
use std::time::Duration;

use spdlog::{error, info, trace};
use tokio::task::JoinHandle;

use crate::metrics::metric_publisher::MetricPublisher;
use crate::metrics::MetricRegistry;

pub type SpaceProbe = Box<dyn Fn() -> Option<u64> + Send>;

/// Background task writing a registry snapshot every `period`
pub struct MetricHandler {
    publisher_task: JoinHandle<()>,
}

impl MetricHandler {
    /// Must be called from inside the runtime
    pub fn start(registry: Arc<MetricRegistry>, publisher: MetricPublisher, space_probe: SpaceProbe, period: Duration) -> Self {
        let publisher_task = tokio::spawn(async move {
            info!("Starting metrics publisher. Period={:?}", period);
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let snapshot = registry.snapshot(space_probe());
                if let Err(e) = publisher.store_snapshot(&snapshot) {
                    error!("Error writing metrics snapshot: {}", e);
                }
                trace!("Metrics snapshot written with {} counters", snapshot.counters.len());
            }
        });

        Self {
            publisher_task,
        }
    }
}

impl Drop for MetricHandler {
    fn drop(&mut self) {
        self.publisher_task.abort();
    }
}
