//! Bloom Filter Service
//!
//! Owns one filter for its whole life: it is built and filled once by
//! [`BloomFilterService::load`] and only read afterwards.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::domain::{calculate_optimal_parameters, BloomConfig, BloomFilter};
use crate::error::FilterError;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::ports::{KeySource, ResultSink};

/// Summary of a completed load
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadReport {
    /// Number of keys read from the source (the `n` the filter was sized for)
    pub keys_loaded: usize,
    /// Bits per vector (m)
    pub size_bits: usize,
    /// Number of vectors (k)
    pub hash_count: usize,
    /// Bytes held by the bit vectors
    pub memory_bytes: usize,
    /// Predicted false positive rate at `keys_loaded`
    pub expected_fpr: f64,
    /// Time spent hashing and inserting the keys
    #[serde(serialize_with = "serialize_secs")]
    pub fill_time: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Bloom Filter Service implementation
pub struct BloomFilterService<M: MetricsRecorder = Metrics> {
    filter: BloomFilter,
    config: BloomConfig,
    metrics: Arc<M>,
    report: LoadReport,
}

impl<M: MetricsRecorder> BloomFilterService<M> {
    /// Read every key from `source`, size a filter for them and insert them
    /// in source order.
    ///
    /// # Errors
    /// - `InvalidParameter` if the config is invalid or the source is empty
    /// - `FilterTooLarge` if `m * k` exceeds `config.max_size_bits`
    /// - `DataError` if the source cannot be read
    pub fn load<S: KeySource + ?Sized>(
        source: &mut S,
        config: BloomConfig,
        metrics: Arc<M>,
    ) -> Result<Self, FilterError> {
        config.validate()?;

        let keys = source.load_keys()?;
        let params = calculate_optimal_parameters(keys.len(), config.target_fpr)?;
        config.check_size(&params)?;

        let mut filter = BloomFilter::new(params.size_bits, params.hash_count)?;
        metrics.record_filter_created(filter.memory_bytes());

        let start = Instant::now();
        for key in &keys {
            filter.add(key.as_bytes());
        }
        let fill_time = start.elapsed();
        metrics.record_load(keys.len(), fill_time);

        let report = LoadReport {
            keys_loaded: keys.len(),
            size_bits: filter.size_bits(),
            hash_count: filter.hash_count(),
            memory_bytes: filter.memory_bytes(),
            expected_fpr: params.expected_fpr,
            fill_time,
        };

        info!(
            n = report.keys_loaded,
            m = report.size_bits,
            k = report.hash_count,
            p = config.target_fpr,
            bytes = report.memory_bytes,
            fill_ms = fill_time.as_millis() as u64,
            "Filter loaded"
        );

        Ok(Self {
            filter,
            config,
            metrics,
            report,
        })
    }

    /// Membership query; `false` means the key was definitely never added
    pub fn query(&self, key: &str) -> bool {
        let start = Instant::now();
        let found = self.filter.query(key.as_bytes());
        self.metrics.record_lookup(start.elapsed(), found);
        debug!(key, found, "Query");
        found
    }

    /// Query `key` and hand the answer to `sink`
    pub fn query_and_record<R: ResultSink + ?Sized>(
        &self,
        key: &str,
        sink: &mut R,
    ) -> Result<bool, FilterError> {
        let found = self.query(key);
        sink.record(key, found)?;
        Ok(found)
    }

    /// Query every key in order, recording each answer
    ///
    /// Returns the number of keys reported as possibly present.
    pub fn query_all<'a, I, R>(&self, keys: I, sink: &mut R) -> Result<usize, FilterError>
    where
        I: IntoIterator<Item = &'a str>,
        R: ResultSink + ?Sized,
    {
        let mut positives = 0;
        for key in keys {
            if self.query_and_record(key, sink)? {
                positives += 1;
            }
        }
        Ok(positives)
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    pub fn config(&self) -> &BloomConfig {
        &self.config
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }
}
