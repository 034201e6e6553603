//! # BioBloom Benchmarks
//!
//! Criterion workloads registered by `benches/filter_benchmarks.rs`.

pub mod filter;
pub mod hashing;
