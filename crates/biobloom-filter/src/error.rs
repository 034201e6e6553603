//! Error types for the BioBloom filter crate

use thiserror::Error;

/// Errors that can occur while sizing, building or feeding a filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Filter size exceeds maximum: {size} > {max} bits")]
    FilterTooLarge { size: usize, max: usize },

    #[error("Data source error: {0}")]
    DataError(#[from] DataError),
}

impl FilterError {
    /// Shorthand for an `InvalidParameter` error
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors caused by a bad sizing or construction parameter
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, FilterError::InvalidParameter { .. })
    }
}

/// Errors from key sources and result sinks
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
}

impl DataError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
