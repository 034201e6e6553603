//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use biobloom_filter::domain::{BloomConfigBuilder, KeyFormat};
//!
//! let config = BloomConfigBuilder::new()
//!     .target_fpr(0.05)
//!     .key_format(KeyFormat::Fasta)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.target_fpr, 0.05);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::parameters::{validate_fpr, BloomFilterParams};
use crate::error::FilterError;

/// Default cap on total filter size (m * k bits), 2 GiB of bits
pub const DEFAULT_MAX_SIZE_BITS: usize = 1 << 34;

/// How a key source is split into keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    /// One key per line
    #[default]
    Lines,
    /// One key per FASTA record (sequence lines joined, `>` headers dropped)
    Fasta,
}

impl FromStr for KeyFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "text" => Ok(KeyFormat::Lines),
            "fasta" => Ok(KeyFormat::Fasta),
            other => Err(FilterError::invalid(
                "key_format",
                format!("unknown format '{}'", other),
            )),
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Lines => write!(f, "lines"),
            KeyFormat::Fasta => write!(f, "fasta"),
        }
    }
}

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomConfig {
    /// Target false positive rate, in (0, 1)
    pub target_fpr: f64,
    /// Key source layout
    pub key_format: KeyFormat,
    /// Strip surrounding whitespace from every key
    pub trim_keys: bool,
    /// Maximum total filter size (m * k) in bits
    pub max_size_bits: usize,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            target_fpr: 0.01,
            key_format: KeyFormat::Lines,
            trim_keys: true,
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
        }
    }
}

impl BloomConfig {
    /// Create a configuration for `target_fpr` with validation
    pub fn new(target_fpr: f64) -> Result<Self, FilterError> {
        let config = Self {
            target_fpr,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration before any filter is built
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_fpr(self.target_fpr)?;

        if self.max_size_bits == 0 {
            return Err(FilterError::invalid("max_size_bits", "cannot be 0"));
        }

        Ok(())
    }

    /// Reject parameters whose total size exceeds `max_size_bits`
    pub fn check_size(&self, params: &BloomFilterParams) -> Result<(), FilterError> {
        let size = params.size_bits.saturating_mul(params.hash_count);
        if size > self.max_size_bits {
            return Err(FilterError::FilterTooLarge {
                size,
                max: self.max_size_bits,
            });
        }
        Ok(())
    }

    /// Builder-style method to set target FPR
    pub fn with_target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = fpr;
        self
    }

    /// Builder-style method to set the key format
    pub fn with_key_format(mut self, format: KeyFormat) -> Self {
        self.key_format = format;
        self
    }
}

/// Builder for BloomConfig with validation
#[derive(Default)]
pub struct BloomConfigBuilder {
    target_fpr: Option<f64>,
    key_format: Option<KeyFormat>,
    trim_keys: Option<bool>,
    max_size_bits: Option<usize>,
}

impl BloomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target false positive rate (must be in (0, 1))
    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    pub fn key_format(mut self, format: KeyFormat) -> Self {
        self.key_format = Some(format);
        self
    }

    pub fn trim_keys(mut self, trim: bool) -> Self {
        self.trim_keys = Some(trim);
        self
    }

    /// Set the maximum total filter size in bits
    pub fn max_size_bits(mut self, bits: usize) -> Self {
        self.max_size_bits = Some(bits);
        self
    }

    /// Build the BloomConfig, validating all parameters
    pub fn build(self) -> Result<BloomConfig, FilterError> {
        let defaults = BloomConfig::default();

        let config = BloomConfig {
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
            key_format: self.key_format.unwrap_or(defaults.key_format),
            trim_keys: self.trim_keys.unwrap_or(defaults.trim_keys),
            max_size_bits: self.max_size_bits.unwrap_or(defaults.max_size_bits),
        };

        config.validate()?;
        Ok(config)
    }
}
