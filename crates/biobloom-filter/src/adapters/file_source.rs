//! Key source adapters
//!
//! Two layouts are supported:
//! - plain text, one key per line
//! - FASTA, one key per record: the sequence lines following a `>` header
//!   are joined into a single key and the header itself is discarded

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::KeyFormat;
use crate::error::DataError;
use crate::ports::KeySource;

/// Decoded lines of `reader`, without terminators
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the load; the number of affected lines is logged once.
fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>, DataError> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut lossy = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(e) => {
                lossy += 1;
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        lines.push(line);
    }

    if lossy > 0 {
        warn!(lines = lossy, "Replaced invalid UTF-8 in input lines");
    }
    Ok(lines)
}

/// Read one key per line
pub fn parse_lines<R: BufRead>(reader: R, trim: bool) -> Result<Vec<String>, DataError> {
    let lines = read_lines(reader)?;
    Ok(if trim {
        lines.into_iter().map(|line| line.trim().to_string()).collect()
    } else {
        lines
    })
}

/// Read one key per FASTA record
///
/// Sequence data before the first header and records with no sequence
/// lines are skipped.
pub fn parse_fasta<R: BufRead>(reader: R, trim: bool) -> Result<Vec<String>, DataError> {
    let mut keys = Vec::new();
    let mut current: Option<String> = None;
    let mut orphan_lines = 0usize;

    for line in read_lines(reader)? {
        if line.trim_start().starts_with('>') {
            if let Some(sequence) = current.take() {
                push_record(&mut keys, sequence);
            }
            current = Some(String::new());
            continue;
        }

        let data = if trim { line.trim() } else { line.as_str() };
        match current.as_mut() {
            Some(sequence) => sequence.push_str(data),
            None if !data.is_empty() => orphan_lines += 1,
            None => {}
        }
    }
    if let Some(sequence) = current {
        push_record(&mut keys, sequence);
    }

    if orphan_lines > 0 {
        warn!(lines = orphan_lines, "Skipped sequence data before first FASTA header");
    }
    Ok(keys)
}

fn push_record(keys: &mut Vec<String>, sequence: String) {
    if sequence.is_empty() {
        debug!(record = keys.len(), "Skipping empty FASTA record");
    } else {
        keys.push(sequence);
    }
}

/// Parse `reader` according to `format`
pub fn parse_keys<R: BufRead>(
    reader: R,
    format: KeyFormat,
    trim: bool,
) -> Result<Vec<String>, DataError> {
    match format {
        KeyFormat::Lines => parse_lines(reader, trim),
        KeyFormat::Fasta => parse_fasta(reader, trim),
    }
}

/// Key source backed by a file on disk
#[derive(Clone, Debug)]
pub struct FileKeySource {
    path: PathBuf,
    format: KeyFormat,
    trim: bool,
}

impl FileKeySource {
    pub fn new(path: impl AsRef<Path>, format: KeyFormat, trim: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
            trim,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeySource for FileKeySource {
    fn load_keys(&mut self) -> Result<Vec<String>, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        let keys = parse_keys(BufReader::new(file), self.format, self.trim)?;
        debug!(
            path = %self.path.display(),
            format = %self.format,
            keys = keys.len(),
            "Loaded keys"
        );
        Ok(keys)
    }
}

/// Key source backed by any buffered reader; it can be drained once
pub struct ReaderKeySource<R: BufRead> {
    reader: Option<R>,
    format: KeyFormat,
    trim: bool,
}

impl<R: BufRead> ReaderKeySource<R> {
    pub fn new(reader: R, format: KeyFormat, trim: bool) -> Self {
        Self {
            reader: Some(reader),
            format,
            trim,
        }
    }
}

impl<R: BufRead> KeySource for ReaderKeySource<R> {
    fn load_keys(&mut self) -> Result<Vec<String>, DataError> {
        match self.reader.take() {
            Some(reader) => parse_keys(reader, self.format, self.trim),
            None => Ok(Vec::new()),
        }
    }
}
