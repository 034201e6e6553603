//! Scalable Bloom filter
//!
//! A chain of fixed-size [`BloomFilter`]s for key sets whose size is not
//! known up front. Each filter holds `fill_limit` keys; when the newest one
//! is full another is appended with a tighter error rate
//! `p_i = p_(i-1) * r`. Existing filters are never resized.

use tracing::debug;

use super::bloom_filter::BloomFilter;
use super::parameters::validate_fpr;
use crate::error::FilterError;

/// Default tightening ratio between successive filters
pub const DEFAULT_TIGHTENING_RATIO: f64 = 0.9;

/// Growing chain of Bloom filters
#[derive(Clone, Debug)]
pub struct ScalableBloomFilter {
    filters: Vec<BloomFilter>,
    /// Keys per filter before a new one is appended
    fill_limit: usize,
    /// Error rate of the first filter
    initial_fpr: f64,
    /// Error rate of the newest filter
    current_fpr: f64,
    /// Tightening ratio r
    tightening_ratio: f64,
    /// Keys in the newest filter
    items_in_current: usize,
}

impl ScalableBloomFilter {
    /// Create a chain whose first filter is sized for `fill_limit` keys at
    /// `initial_fpr`, using the default tightening ratio
    pub fn new(fill_limit: usize, initial_fpr: f64) -> Result<Self, FilterError> {
        Self::with_tightening_ratio(fill_limit, initial_fpr, DEFAULT_TIGHTENING_RATIO)
    }

    /// Create a chain with an explicit tightening ratio `r` in (0, 1]
    pub fn with_tightening_ratio(
        fill_limit: usize,
        initial_fpr: f64,
        tightening_ratio: f64,
    ) -> Result<Self, FilterError> {
        if fill_limit == 0 {
            return Err(FilterError::invalid("fill_limit", "must be at least 1"));
        }
        validate_fpr(initial_fpr)?;
        if !(tightening_ratio > 0.0 && tightening_ratio <= 1.0) {
            return Err(FilterError::invalid(
                "tightening_ratio",
                format!("{} must be in (0, 1]", tightening_ratio),
            ));
        }

        let first = BloomFilter::new_with_fpr(fill_limit, initial_fpr)?;
        Ok(Self {
            filters: vec![first],
            fill_limit,
            initial_fpr,
            current_fpr: initial_fpr,
            tightening_ratio,
            items_in_current: 0,
        })
    }

    /// Insert a key into the newest filter, growing the chain when it fills up
    pub fn add(&mut self, key: &[u8]) -> Result<(), FilterError> {
        if self.items_in_current >= self.fill_limit {
            self.grow()?;
        }
        if let Some(current) = self.filters.last_mut() {
            current.add(key);
        }
        self.items_in_current += 1;
        Ok(())
    }

    /// True if any filter in the chain might contain the key
    pub fn query(&self, key: &[u8]) -> bool {
        self.filters.iter().any(|filter| filter.query(key))
    }

    fn grow(&mut self) -> Result<(), FilterError> {
        let next_fpr = self.current_fpr * self.tightening_ratio;
        let filter = BloomFilter::new_with_fpr(self.fill_limit, next_fpr)?;
        debug!(
            filters = self.filters.len() + 1,
            fpr = next_fpr,
            "Appending filter to scalable chain"
        );
        self.filters.push(filter);
        self.current_fpr = next_fpr;
        self.items_in_current = 0;
        Ok(())
    }

    /// Number of filters in the chain
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Filters in insertion order
    pub fn filters(&self) -> &[BloomFilter] {
        &self.filters
    }

    /// Total keys added across the chain
    pub fn element_count(&self) -> usize {
        self.filters.iter().map(BloomFilter::element_count).sum()
    }

    /// Error rate the newest filter was sized for
    pub fn current_fpr(&self) -> f64 {
        self.current_fpr
    }

    /// Upper bound on the compound false positive rate, `sum(p_i)`
    pub fn compound_fpr_bound(&self) -> f64 {
        (0..self.filters.len())
            .map(|i| self.initial_fpr * self.tightening_ratio.powi(i as i32))
            .sum()
    }

    /// Bytes held by all filters
    pub fn memory_bytes(&self) -> usize {
        self.filters.iter().map(BloomFilter::memory_bytes).sum()
    }
}
