//! Metrics hooks for filter operations
//!
//! Counters for filter lifecycle, inserts, lookups and store failures.
//!
//! ## Usage
//!
//! ```ignore
//! use remote_bloom::metrics::Metrics;
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let filter = RemoteBloomFilter::new(store, "bf", 10_000, 0.001)?
//!     .with_metrics(metrics.clone());
//!
//! filter.add(b"key").await?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
#[derive(Default)]
pub struct Metrics {
    /// Filters constructed
    pub filters_created: AtomicU64,
    /// Filters released
    pub filters_released: AtomicU64,
    /// Successful `add` calls
    pub inserts: AtomicU64,
    /// Successful `exists` calls
    pub lookups_performed: AtomicU64,
    /// `exists` calls answering "possibly present"
    pub lookups_positive: AtomicU64,
    /// Failed store calls (including timeouts)
    pub store_errors: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_created(&self, _bit_count: u32, _hash_count: u32) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filter_released(&self) {
        self.filters_released.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self, duration: Duration) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// `found` may be a false positive
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            filters_released: self.filters_released.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            avg_lookup_ns: average(&self.lookup_time_ns, &self.lookups_performed),
            avg_insert_ns: average(&self.insert_time_ns, &self.inserts),
        }
    }

    /// Share of lookups that answered "possibly present"
    ///
    /// Against keys known to be absent this is the observed false positive rate.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        self.lookups_positive.load(Ordering::Relaxed) as f64 / total as f64
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.filters_released,
            &self.inserts,
            &self.lookups_performed,
            &self.lookups_positive,
            &self.store_errors,
            &self.lookup_time_ns,
            &self.insert_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn average(total_ns: &AtomicU64, count: &AtomicU64) -> u64 {
    let count = count.load(Ordering::Relaxed);
    if count == 0 {
        return 0;
    }
    total_ns.load(Ordering::Relaxed) / count
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub filters_released: u64,
    pub inserts: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub store_errors: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, bit_count: u32, hash_count: u32);

    fn record_filter_released(&self);

    fn record_insert(&self, duration: Duration);

    fn record_lookup(&self, duration: Duration, found: bool);

    fn record_store_error(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: u32, _: u32) {}
    fn record_filter_released(&self) {}
    fn record_insert(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_store_error(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, bit_count: u32, hash_count: u32) {
        Metrics::record_filter_created(self, bit_count, hash_count);
    }

    fn record_filter_released(&self) {
        Metrics::record_filter_released(self);
    }

    fn record_insert(&self, duration: Duration) {
        Metrics::record_insert(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_store_error(&self) {
        Metrics::record_store_error(self);
    }
}
