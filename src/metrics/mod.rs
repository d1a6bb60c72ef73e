pub use metric_registry::{MetricRegistry, MetricSnapshot};

pub mod metric_handler;
pub mod metric_publisher;
pub mod metric_registry;

pub const HIT_COUNTER_PREFIX: &str = "content_hits_";
pub const NOT_FOUND_COUNTER: &str = "fetch_content_with_not_existing_title";
pub const USABLE_SPACE_GAUGE: &str = "usable_space_mb";

/// Signals raised by the content store
pub trait ContentMetrics: Send + Sync {
    /// A title was found and read
    fn hit(&self, title: &str);

    /// A lookup pointed at content that does not exist
    fn not_found(&self);
}

pub struct NoOpMetrics;

impl ContentMetrics for NoOpMetrics {
    fn hit(&self, _title: &str) {}

    fn not_found(&self) {}
}
