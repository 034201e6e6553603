//! Single-array Bloom filter
//!
//! All `k` hash rounds share one array of `m` bits, unlike [`BloomFilter`] which
//! gives each round its own vector. Bit positions come from the same
//! FNV/Murmur double hashing ([`HashPair::indices`]).
//!
//! [`BloomFilter`]: super::BloomFilter

use bitvec::prelude::*;
use tracing::debug;

use super::hash_functions::HashPair;
use super::parameters::{calculate_classic_fpr, calculate_classic_parameters};
use crate::error::FilterError;

/// Bloom filter with one shared bit array
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicBloomFilter {
    bits: BitVec<u8, Lsb0>,
    k: usize,
    n: usize,
}

impl ClassicBloomFilter {
    /// Create a filter with an array of `m` zero bits and `k` hash rounds per key
    ///
    /// # Errors
    /// `InvalidParameter` if `m` or `k` is 0; `FilterTooLarge` if `m`
    /// exceeds what a bit vector can address.
    pub fn new(m: usize, k: usize) -> Result<Self, FilterError> {
        if m == 0 {
            return Err(FilterError::invalid("m", "bit array length must be at least 1"));
        }
        if k == 0 {
            return Err(FilterError::invalid("k", "hash count must be at least 1"));
        }
        let max_bits = BitSlice::<u8, Lsb0>::MAX_BITS;
        if m > max_bits {
            return Err(FilterError::FilterTooLarge { size: m, max: max_bits });
        }

        debug!(m, k, "Created single-array bloom filter");
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; m],
            k,
            n: 0,
        })
    }

    /// Create a filter sized for `expected_elements` keys at `target_fpr`
    pub fn new_with_fpr(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        let params = calculate_classic_parameters(expected_elements, target_fpr)?;
        Self::new(params.size_bits, params.hash_count)
    }

    pub fn add(&mut self, key: &[u8]) {
        let m = self.bits.len();
        for index in HashPair::of(key).indices(self.k, m) {
            self.bits.set(index, true);
        }
        self.n += 1;
    }

    /// `false` means definitely absent; stops at the first clear bit
    pub fn query(&self, key: &[u8]) -> bool {
        HashPair::of(key)
            .indices(self.k, self.bits.len())
            .all(|index| self.bits[index])
    }

    pub fn size_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_count(&self) -> usize {
        self.k
    }

    pub fn element_count(&self) -> usize {
        self.n
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_classic_fpr(self.bits.len(), self.n, self.k)
    }

    pub fn memory_bytes(&self) -> usize {
        std::mem::size_of_val(self.bits.as_raw_slice())
    }
}
