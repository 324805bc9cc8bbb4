//! JSONL log reader

use crate::entry::RawLogEntry;
use sqlscope_core::{Result, SqlscopeError};
use std::io::BufRead;

/// Lazily decodes newline-delimited JSON log entries from a buffered reader.
///
/// Blank lines are skipped. Lines that fail to decode are yielded as
/// [`SqlscopeError::MalformedRecord`] so the ingestor can count them without
/// aborting; I/O errors surface as [`SqlscopeError::Io`].
pub struct JsonlReader<R> {
    inner: R,
    line_number: u64,
}

impl<R: BufRead> JsonlReader<R> {
    /// Wraps a buffered reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }

    /// Line number of the most recently read line (1-based)
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<RawLogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = String::new();
            match self.inner.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(trimmed).map_err(|err| {
                        SqlscopeError::MalformedRecord(format!(
                            "line {}: {}",
                            self.line_number, err
                        ))
                    }));
                }
                Err(err) => return Some(Err(SqlscopeError::Io(err))),
            }
        }
    }
}
