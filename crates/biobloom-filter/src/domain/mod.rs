//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash functions (FNV, MurmurHash3) and round index derivation
//! - Parameter calculations
//! - Core Bloom filter implementation
//! - Single-array Bloom filter
//! - Scalable Bloom filter (chain of fixed-size filters)
//! - Lock-protected shared filter handle
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod classic;
pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod scalable;
pub mod shared_filter;

pub use bloom_filter::BloomFilter;
pub use classic::ClassicBloomFilter;
pub use config::{BloomConfig, BloomConfigBuilder, KeyFormat};
pub use hash_functions::{
    compute_hash_positions, fnv1_hash32, fnv_hash32, murmur3_32, murmur3_32_seeded, FnvHasher32,
    HashPair,
};
pub use parameters::{
    calculate_classic_fpr, calculate_classic_parameters, calculate_fpr,
    calculate_optimal_parameters, BloomFilterParams,
};
pub use scalable::ScalableBloomFilter;
pub use shared_filter::SharedBloomFilter;
