//! Service Layer
//!
//! Orchestrates the domain: pulls keys from a `KeySource`, sizes and fills
//! a `BloomFilter`, then answers queries and reports them to a `ResultSink`.

pub mod filter_service;

pub use filter_service::{BloomFilterService, LoadReport};
