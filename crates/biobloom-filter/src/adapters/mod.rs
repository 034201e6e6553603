//! Adapters Layer - Connections to files and streams
//!
//! - `FileKeySource` / `ReaderKeySource`: plain-text and FASTA key loading
//! - `AppendFileSink` / `LineSink`: one result line per query

pub mod file_sink;
pub mod file_source;

pub use file_sink::{format_result, AppendFileSink, LineSink};
pub use file_source::{parse_fasta, parse_keys, parse_lines, FileKeySource, ReaderKeySource};
