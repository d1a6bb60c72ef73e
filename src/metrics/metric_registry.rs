use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::{ContentMetrics, HIT_COUNTER_PREFIX, NOT_FOUND_COUNTER, USABLE_SPACE_GAUGE};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub taken_at: DateTime<Utc>,
    pub counters: BTreeMap<String, u64>,
    pub gauges: BTreeMap<String, u64>,
}

/// Process wide counters, shared between request handlers
#[derive(Default)]
pub struct MetricRegistry {
    counters: Mutex<HashMap<String, u64>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(name).copied().unwrap_or(0)
    }

    /// Current counters plus the free space gauge, when it could be read
    pub fn snapshot(&self, usable_space_mb: Option<u64>) -> MetricSnapshot {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let mut gauges = BTreeMap::new();
        if let Some(space) = usable_space_mb {
            gauges.insert(USABLE_SPACE_GAUGE.to_string(), space);
        }

        MetricSnapshot {
            taken_at: Utc::now(),
            counters: counters.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            gauges,
        }
    }
}

impl ContentMetrics for MetricRegistry {
    /// Keyed by the title as requested, not the normalized file name, so
    /// every spelling that resolves to the same file adds its own counter.
    fn hit(&self, title: &str) {
        self.increment(&format!("{}{}", HIT_COUNTER_PREFIX, title));
    }

    fn not_found(&self) {
        self.increment(NOT_FOUND_COUNTER);
    }
}
