//! Query log ingestion

use crate::entry::RawLogEntry;
use crate::reader::JsonlReader;
use sqlscope_core::{IngestSession, Result};
use std::io::BufRead;

/// Builds an [`IngestSession`] from raw log entries.
///
/// Malformed entries are skipped and counted on the session, never fatal.
/// I/O errors from an underlying reader abort ingestion.
#[derive(Debug, Clone, Default)]
pub struct Ingestor;

impl Ingestor {
    /// Creates a new ingestor
    pub fn new() -> Self {
        Self
    }

    /// Ingests an already-decoded entry stream in arrival order.
    pub fn ingest<I>(&self, entries: I) -> IngestSession
    where
        I: IntoIterator<Item = RawLogEntry>,
    {
        let mut session = IngestSession::new();
        for entry in entries {
            Self::ingest_one(&mut session, entry);
        }
        Self::log_summary(&session);
        session
    }

    /// Ingests a fallible entry stream, e.g. from [`JsonlReader`].
    ///
    /// Decode failures count as malformed; any other error aborts.
    pub fn ingest_results<I>(&self, entries: I) -> Result<IngestSession>
    where
        I: IntoIterator<Item = Result<RawLogEntry>>,
    {
        let mut session = IngestSession::new();
        for item in entries {
            match item {
                Ok(entry) => Self::ingest_one(&mut session, entry),
                Err(err) if err.is_record_local() => {
                    tracing::debug!(error = %err, "skipping undecodable log line");
                    session.record_skipped();
                }
                Err(err) => return Err(err),
            }
        }
        Self::log_summary(&session);
        Ok(session)
    }

    /// Reads newline-delimited JSON from a buffered reader and ingests it.
    pub fn ingest_reader<R: BufRead>(&self, reader: R) -> Result<IngestSession> {
        self.ingest_results(JsonlReader::new(reader))
    }

    fn ingest_one(session: &mut IngestSession, entry: RawLogEntry) {
        match entry.validate() {
            Ok(valid) => {
                session.push(
                    valid.statement,
                    valid.row_count,
                    valid.duration_ms,
                    valid.timestamp,
                );
            }
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed log entry");
                session.record_skipped();
            }
        }
    }

    fn log_summary(session: &IngestSession) {
        if session.skipped() > 0 {
            tracing::warn!(
                session_id = %session.id(),
                records = session.len(),
                skipped = session.skipped(),
                "ingestion finished with malformed entries skipped"
            );
        } else {
            tracing::debug!(
                session_id = %session.id(),
                records = session.len(),
                "ingestion finished"
            );
        }
    }
}

#[cfg(test)]
mod tests;
