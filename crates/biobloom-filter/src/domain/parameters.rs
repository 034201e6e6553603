//! Bloom filter parameter calculation
//!
//! Formulas, for `n` expected elements and target false-positive rate `p`:
//! - k = floor(log2(1/p)) + 1
//! - m = floor(|ln p| * n / sqrt(ln 2)) + 1
//!
//! Both dimensions are truncated and then incremented rather than rounded
//! up, so they can exceed the ceiling by one when the raw value is already
//! integral (e.g. `p = 0.5` gives `k = 2`).

use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomFilterParams {
    /// Number of bits per round vector (m)
    pub size_bits: usize,
    /// Number of rounds / bit vectors (k)
    pub hash_count: usize,
    /// False positive rate expected once `n` elements are inserted
    pub expected_fpr: f64,
}

/// Check that `fpr` lies strictly inside (0, 1)
pub fn validate_fpr(fpr: f64) -> Result<(), FilterError> {
    if fpr > 0.0 && fpr < 1.0 {
        Ok(())
    } else {
        Err(FilterError::invalid(
            "p",
            format!("false positive rate {} must be in (0, 1)", fpr),
        ))
    }
}

/// Calculate Bloom filter parameters for `num_elements` keys at `target_fpr`
///
/// # Errors
/// `InvalidParameter` if `num_elements` is 0 or `target_fpr` is outside
/// (0, 1); `FilterTooLarge` if `m` does not fit in a `usize`.
pub fn calculate_optimal_parameters(
    num_elements: usize,
    target_fpr: f64,
) -> Result<BloomFilterParams, FilterError> {
    if num_elements == 0 {
        return Err(FilterError::invalid(
            "n",
            "expected element count must be at least 1",
        ));
    }
    validate_fpr(target_fpr)?;

    let n = num_elements as f64;

    let k_raw = (1.0 / target_fpr).log2();
    let m_raw = target_fpr.ln().abs() * n / LN_2.sqrt();

    if !m_raw.is_finite() || m_raw >= usize::MAX as f64 {
        return Err(FilterError::FilterTooLarge {
            size: usize::MAX,
            max: usize::MAX,
        });
    }

    let hash_count = k_raw as usize + 1;
    let size_bits = m_raw as usize + 1;

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: calculate_fpr(size_bits, num_elements, hash_count),
    })
}

/// False positive rate of a filter with `k` vectors of `m` bits after `n`
/// insertions.
///
/// Every key sets one bit per vector, so each vector is filled to
/// `1 - e^(-n/m)` and a miss must survive all `k` of them:
/// FPR = (1 - e^(-n/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let fill = 1.0 - (-(n as f64) / m as f64).exp();
    fill.powf(k as f64)
}

/// Parameters for a single shared array of `m` bits set by `k` hash rounds
///
/// - m = max(1, floor(n * |ln p| / (ln 2)^2))
/// - k = max(1, ceil(log2(1/p)))
///
/// `size_bits` is the length of the one array, not of a per-round vector.
pub fn calculate_classic_parameters(
    num_elements: usize,
    target_fpr: f64,
) -> Result<BloomFilterParams, FilterError> {
    if num_elements == 0 {
        return Err(FilterError::invalid(
            "n",
            "expected element count must be at least 1",
        ));
    }
    validate_fpr(target_fpr)?;

    let m_raw = num_elements as f64 * target_fpr.ln().abs() / (LN_2 * LN_2);
    if !m_raw.is_finite() || m_raw >= usize::MAX as f64 {
        return Err(FilterError::FilterTooLarge {
            size: usize::MAX,
            max: usize::MAX,
        });
    }

    let size_bits = (m_raw as usize).max(1);
    let hash_count = ((1.0 / target_fpr).log2().ceil() as usize).max(1);

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: calculate_classic_fpr(size_bits, num_elements, hash_count),
    })
}

/// FPR of one `m`-bit array after `n` insertions of `k` bits each:
/// (1 - e^(-kn/m))^k
pub fn calculate_classic_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let fill = 1.0 - (-(k as f64) * n as f64 / m as f64).exp();
    fill.powf(k as f64)
}
