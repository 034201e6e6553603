//! # BioBloom Filter
//!
//! Bloom filter for genomic key sets: k independent bit vectors of m bits,
//! indexed by a blend of 32-bit FNV-1a and MurmurHash3.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: k vectors of m bits, one per hash round
//!   - `ClassicBloomFilter`: one m-bit array shared by all k hash rounds
//!   - `ScalableBloomFilter`: chain of filters that grows as keys arrive
//!   - `SharedBloomFilter`: lock-guarded filter for concurrent readers
//!   - `BloomConfig` / `BloomConfigBuilder`: validated configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: driving port implemented by every filter
//!   - `KeySource` / `ResultSink`: driven ports for input keys and answers
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `BloomFilterService`: load once, then answer queries
//!
//! - **Adapters Layer** (`adapters/`): Files and streams
//!
//! ## Invariants
//!
//! - No false negatives: once `add(key)` returns, `query(key)` is true.
//! - Sizing: `k = floor(log2(1/p)) + 1`, `m = floor(|ln p| * n / sqrt(ln 2)) + 1`.
//! - Round `i` sets exactly one bit in vector `i`.
//!
//! ## Usage Example
//!
//! ```
//! use biobloom_filter::BloomFilter;
//!
//! let mut filter = BloomFilter::new_with_fpr(1000, 0.01)?;
//! assert_eq!((filter.size_bits(), filter.hash_count()), (5532, 7));
//!
//! filter.add(b"GATTACA");
//! assert!(filter.query(b"GATTACA"));
//! # Ok::<(), biobloom_filter::FilterError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{AppendFileSink, FileKeySource, LineSink, ReaderKeySource};
pub use domain::{
    fnv1_hash32, fnv_hash32, murmur3_32, BloomConfig, BloomConfigBuilder, BloomFilter,
    ClassicBloomFilter, KeyFormat, ScalableBloomFilter, SharedBloomFilter,
};
pub use error::{DataError, FilterError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{KeySource, MembershipFilter, ResultSink};
pub use service::{BloomFilterService, LoadReport};
