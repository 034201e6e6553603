//! Load and query timing
//!
//! A service reports each filter allocation and the one bulk load that
//! fills it, then every query it answers. Per-key insert latency is the
//! load time averaged over the keys loaded.
//!
//! ```
//! use biobloom_filter::metrics::{Metrics, MetricsRecorder};
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_created(4844);
//! metrics.record_load(1000, Duration::from_micros(500));
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.bytes_allocated, 4844);
//! assert_eq!(snapshot.avg_insert_ns, 500);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Sink for service timing events
pub trait MetricsRecorder: Send + Sync {
    /// A filter holding `memory_bytes` of bit vectors was allocated
    fn record_filter_created(&self, memory_bytes: usize);

    /// `keys` keys were hashed and inserted in `duration`
    fn record_load(&self, keys: usize, duration: Duration);

    /// One query answered in `duration`
    fn record_lookup(&self, duration: Duration, found: bool);
}

/// Recorder that drops every event
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize) {}
    fn record_load(&self, _: usize, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

/// Lock-free counters, safe to share between threads
#[derive(Debug, Default)]
pub struct Metrics {
    filters_created: AtomicU64,
    bytes_allocated: AtomicU64,
    keys_loaded: AtomicU64,
    load_ns: AtomicU64,
    queries: AtomicU64,
    queries_positive: AtomicU64,
    query_ns: AtomicU64,
}

fn add(counter: &AtomicU64, value: u64) {
    counter.fetch_add(value, Ordering::Relaxed);
}

fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

fn mean(total: u64, count: u64) -> u64 {
    total.checked_div(count).unwrap_or(0)
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let read = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        let keys_loaded = read(&self.keys_loaded);
        let load_time_ns = read(&self.load_ns);
        let queries = read(&self.queries);

        MetricsSnapshot {
            filters_created: read(&self.filters_created),
            bytes_allocated: read(&self.bytes_allocated),
            keys_loaded,
            load_time_ns,
            avg_insert_ns: mean(load_time_ns, keys_loaded),
            queries,
            queries_positive: read(&self.queries_positive),
            avg_query_ns: mean(read(&self.query_ns), queries),
        }
    }
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, memory_bytes: usize) {
        add(&self.filters_created, 1);
        add(&self.bytes_allocated, memory_bytes as u64);
    }

    fn record_load(&self, keys: usize, duration: Duration) {
        add(&self.keys_loaded, keys as u64);
        add(&self.load_ns, nanos(duration));
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        add(&self.queries, 1);
        add(&self.query_ns, nanos(duration));
        if found {
            add(&self.queries_positive, 1);
        }
    }
}

/// Counter values at one instant, as printed by `--stats-json`
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub bytes_allocated: u64,
    pub keys_loaded: u64,
    pub load_time_ns: u64,
    /// Fill time divided by keys loaded
    pub avg_insert_ns: u64,
    pub queries: u64,
    pub queries_positive: u64,
    pub avg_query_ns: u64,
}

impl MetricsSnapshot {
    pub fn load_time_secs(&self) -> f64 {
        Duration::from_nanos(self.load_time_ns).as_secs_f64()
    }
}
