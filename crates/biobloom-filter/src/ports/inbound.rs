//! Inbound Ports (Driving Ports)
//!
//! The membership API that callers use regardless of which filter
//! variant backs it.

use crate::domain::{BloomFilter, ClassicBloomFilter, ScalableBloomFilter, SharedBloomFilter};
use crate::error::FilterError;

/// Probabilistic set membership (Driving Port)
pub trait MembershipFilter {
    /// Insert a key
    fn insert(&mut self, key: &[u8]) -> Result<(), FilterError>;

    /// `false` means definitely absent, `true` means possibly present
    fn contains(&self, key: &[u8]) -> bool;

    /// Number of keys inserted so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert every key from an iterator, in order
    fn insert_all<I, K>(&mut self, keys: I) -> Result<(), FilterError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
        Self: Sized,
    {
        for key in keys {
            self.insert(key.as_ref())?;
        }
        Ok(())
    }
}

impl MembershipFilter for BloomFilter {
    fn insert(&mut self, key: &[u8]) -> Result<(), FilterError> {
        self.add(key);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.query(key)
    }

    fn len(&self) -> usize {
        self.element_count()
    }
}

impl MembershipFilter for ClassicBloomFilter {
    fn insert(&mut self, key: &[u8]) -> Result<(), FilterError> {
        self.add(key);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.query(key)
    }

    fn len(&self) -> usize {
        self.element_count()
    }
}

impl MembershipFilter for ScalableBloomFilter {
    fn insert(&mut self, key: &[u8]) -> Result<(), FilterError> {
        self.add(key)
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.query(key)
    }

    fn len(&self) -> usize {
        self.element_count()
    }
}

impl MembershipFilter for SharedBloomFilter {
    fn insert(&mut self, key: &[u8]) -> Result<(), FilterError> {
        self.add(key);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.query(key)
    }

    fn len(&self) -> usize {
        self.element_count()
    }
}
