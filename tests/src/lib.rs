//! # BioBloom Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/   # Criterion workloads, driven from benches/
//! └── integration/  # File → filter → sink flows across crates
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p biobloom-tests
//! cargo test -p biobloom-tests integration::
//!
//! # Benchmarks
//! cargo bench -p biobloom-tests
//! ```

pub mod benchmarks;
pub mod integration;
