//! Core Bloom Filter implementation
//!
//! INVARIANTS:
//! - `m` and `k` are fixed at construction; every round vector has length `m`
//! - Bits only ever go from 0 to 1 (no deletion)
//! - No false negatives: if added, `query()` MUST return true

use bitvec::prelude::*;
use tracing::debug;

use super::hash_functions::HashPair;
use super::parameters::{calculate_fpr, calculate_optimal_parameters};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// The filter keeps one bit vector of `m` bits per hash round. Round `i`
/// only ever touches vector `i`, so each key sets at most one bit in each
/// vector. A filter can only be obtained from [`BloomFilter::new`] or
/// [`BloomFilter::new_with_fpr`]; there is no uninitialized state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    /// One bit vector per round
    bit_vectors: Vec<BitVec<u8, Lsb0>>,
    /// Bits per vector (m)
    m: usize,
    /// Number of rounds (k)
    k: usize,
    /// Number of `add` calls (n)
    n: usize,
}

impl BloomFilter {
    /// Create a filter with `k` zeroed vectors of `m` bits
    ///
    /// # Errors
    /// - `InvalidParameter` if `m` or `k` is 0
    /// - `FilterTooLarge` if one vector cannot hold `m` bits or `m * k`
    ///   overflows `usize`
    pub fn new(m: usize, k: usize) -> Result<Self, FilterError> {
        if m == 0 {
            return Err(FilterError::invalid("m", "bit vector length must be at least 1"));
        }
        if k == 0 {
            return Err(FilterError::invalid("k", "hash round count must be at least 1"));
        }
        let max_bits = BitSlice::<u8, Lsb0>::MAX_BITS;
        if m > max_bits {
            return Err(FilterError::FilterTooLarge { size: m, max: max_bits });
        }
        if m.checked_mul(k).is_none() {
            return Err(FilterError::FilterTooLarge {
                size: usize::MAX,
                max: usize::MAX,
            });
        }

        debug!(m, k, "Created bloom filter");

        Ok(Self {
            bit_vectors: (0..k).map(|_| bitvec![u8, Lsb0; 0; m]).collect(),
            m,
            k,
            n: 0,
        })
    }

    /// Create a filter sized for `expected_elements` keys at `target_fpr`
    ///
    /// # Errors
    /// `InvalidParameter` if `expected_elements` is 0 or `target_fpr` is
    /// outside (0, 1); `FilterTooLarge` if the sized filter cannot be stored.
    pub fn new_with_fpr(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        let params = calculate_optimal_parameters(expected_elements, target_fpr)?;
        debug!(
            n = expected_elements,
            p = target_fpr,
            expected_fpr = params.expected_fpr,
            "Sized bloom filter"
        );
        Self::new(params.size_bits, params.hash_count)
    }

    /// Insert a key into the filter
    ///
    /// After insertion, `query(key)` is guaranteed to return true.
    pub fn add(&mut self, key: &[u8]) {
        let m = self.m;
        let pair = HashPair::of(key);
        for (vector, index) in self.bit_vectors.iter_mut().zip(pair.indices(self.k, m)) {
            vector.set(index, true);
        }
        self.n += 1;
    }

    /// Test if a key might be in the filter
    ///
    /// Returns:
    /// - `true` if the key might be in the set (could be a false positive)
    /// - `false` if the key is definitely NOT in the set
    ///
    /// Stops at the first round whose bit is unset.
    pub fn query(&self, key: &[u8]) -> bool {
        let pair = HashPair::of(key);
        self.bit_vectors
            .iter()
            .zip(pair.indices(self.k, self.m))
            .all(|(vector, index)| vector[index])
    }

    /// Estimated false positive rate at the current element count
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Number of bits set across all vectors
    pub fn bits_set(&self) -> usize {
        self.bit_vectors.iter().map(|v| v.count_ones()).sum()
    }

    /// Fraction of all `m * k` bits that are set
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / (self.m as f64 * self.k as f64)
    }

    /// Bits per vector (m)
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Number of rounds / vectors (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of `add` calls so far
    pub fn element_count(&self) -> usize {
        self.n
    }

    /// Bytes held by the bit vectors
    pub fn memory_bytes(&self) -> usize {
        self.bit_vectors
            .iter()
            .map(|v| std::mem::size_of_val(v.as_raw_slice()))
            .sum()
    }

    /// Read-only view of the vector for 0-based `round`
    pub fn bit_vector(&self, round: usize) -> Option<&BitSlice<u8, Lsb0>> {
        self.bit_vectors.get(round).map(|v| v.as_bitslice())
    }
}
