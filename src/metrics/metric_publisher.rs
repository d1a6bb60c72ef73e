use std::io;
use std::path::Path;
use std::sync::Arc;

use spdlog::sink::{RotatingFileSink, RotationPolicy};
use spdlog::{info, Logger};

use crate::metrics::MetricSnapshot;

/// Appends metric snapshots as JSON lines to a daily rotated file
pub struct MetricPublisher {
    logger: Arc<Logger>,
}

impl MetricPublisher {
    pub fn new(base_path: &Path) -> spdlog::Result<Self> {
        let daily: Arc<RotatingFileSink> = Arc::new(
            RotatingFileSink::builder()
                .base_path(base_path)
                .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
                .rotate_on_open(false)
                .build()?
        );

        let logger = Arc::new(Logger::builder().sink(daily).build()?);
        Ok(Self {
            logger,
        })
    }

    pub fn store_snapshot(&self, snapshot: &MetricSnapshot) -> io::Result<()> {
        let json = serde_json::to_string(snapshot)?;
        info!(logger: self.logger, "{}", &json);
        self.logger.flush();
        Ok(())
    }
}
