//! # Integration Tests
//!
//! - `end_to_end`: key files through `BloomFilterService` into result files
//! - `concurrency`: `SharedBloomFilter` under parallel readers and writers
//! - `accuracy`: observed false positive rates against the sizing model

pub mod accuracy;
pub mod end_to_end;
