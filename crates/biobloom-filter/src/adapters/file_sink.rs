//! Result sink adapters
//!
//! Each answer becomes one line:
//! - `Key <K> possible in filter`
//! - `Key <K> not in filter`

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DataError;
use crate::ports::ResultSink;

/// Render the line written for one answer (without trailing newline)
pub fn format_result(key: &str, possibly_present: bool) -> String {
    if possibly_present {
        format!("Key {} possible in filter", key)
    } else {
        format!("Key {} not in filter", key)
    }
}

/// Sink writing one line per answer to any writer
///
/// Every record is flushed so answers survive an abrupt exit of an
/// interactive session.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for LineSink<W> {
    fn record(&mut self, key: &str, possibly_present: bool) -> Result<(), DataError> {
        writeln!(self.writer, "{}", format_result(key, possibly_present))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sink appending to a file, creating it if needed
pub struct AppendFileSink {
    path: PathBuf,
    inner: LineSink<BufWriter<File>>,
}

impl AppendFileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| DataError::io(&path, e))?;
        Ok(Self {
            path,
            inner: LineSink::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for AppendFileSink {
    fn record(&mut self, key: &str, possibly_present: bool) -> Result<(), DataError> {
        self.inner
            .record(key, possibly_present)
            .map_err(|e| match e {
                DataError::Read(source) => DataError::io(&self.path, source),
                other => other,
            })
    }
}
