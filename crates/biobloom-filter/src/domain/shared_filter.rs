//! Thread-safe Bloom filter handle
//!
//! `add` takes the write lock, so writers are serialized and never
//! interleave with readers. `query` takes the read lock and may run
//! concurrently with other queries.

use parking_lot::RwLock;
use std::sync::Arc;

use super::bloom_filter::BloomFilter;

/// Cloneable, lock-protected handle to a [`BloomFilter`]
#[derive(Clone, Debug)]
pub struct SharedBloomFilter {
    inner: Arc<RwLock<BloomFilter>>,
}

impl SharedBloomFilter {
    pub fn new(filter: BloomFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }

    pub fn add(&self, key: &[u8]) {
        self.inner.write().add(key);
    }

    pub fn query(&self, key: &[u8]) -> bool {
        self.inner.read().query(key)
    }

    pub fn element_count(&self) -> usize {
        self.inner.read().element_count()
    }

    /// Copy of the current filter state
    pub fn snapshot(&self) -> BloomFilter {
        self.inner.read().clone()
    }
}

impl From<BloomFilter> for SharedBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        Self::new(filter)
    }
}
