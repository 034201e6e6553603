//! Outbound Ports (Driven Ports)
//!
//! These traits define what the filter service needs from the outside
//! world: somewhere to load keys from and somewhere to report answers to.

use crate::error::DataError;

/// Ordered supply of keys to load into a filter (Driven Port)
///
/// The number of keys returned is the `n` the filter is sized for. Keys are
/// UTF-8; file adapters replace invalid byte sequences with U+FFFD instead
/// of rejecting the source.
pub trait KeySource {
    /// Read every key, in source order
    fn load_keys(&mut self) -> Result<Vec<String>, DataError>;
}

/// Receiver of query answers (Driven Port)
pub trait ResultSink {
    /// Record the answer for one queried key
    fn record(&mut self, key: &str, possibly_present: bool) -> Result<(), DataError>;
}

impl KeySource for Vec<String> {
    fn load_keys(&mut self) -> Result<Vec<String>, DataError> {
        Ok(std::mem::take(self))
    }
}

impl ResultSink for Vec<(String, bool)> {
    fn record(&mut self, key: &str, possibly_present: bool) -> Result<(), DataError> {
        self.push((key.to_string(), possibly_present));
        Ok(())
    }
}
