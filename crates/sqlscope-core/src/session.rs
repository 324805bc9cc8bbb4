//! Ingestion sessions - ownership scope for one pass over a query log

use crate::record::QueryRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Owns the records produced by one pass over a query log.
///
/// Every record belongs to exactly one session, and sequence numbers within
/// a session are dense and strictly increasing. Analysis borrows records
/// from the session; ownership never transfers out.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    records: Vec<QueryRecord>,
    skipped: u64,
}

impl IngestSession {
    /// Creates an empty session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            records: Vec::new(),
            skipped: 0,
        }
    }

    /// Unique identifier of this session
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session was opened
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Appends a record, assigning it the next sequence number.
    pub fn push(
        &mut self,
        raw_statement: impl Into<String>,
        row_count: u64,
        duration_ms: f64,
        timestamp: DateTime<Utc>,
    ) -> &QueryRecord {
        let sequence_number = self.records.len() as u64;
        let record = QueryRecord::new(
            sequence_number,
            raw_statement.into(),
            row_count,
            duration_ms,
            timestamp,
        );
        tracing::trace!(
            session_id = %self.id,
            sequence_number,
            shape = %record.shape,
            "record ingested"
        );
        self.records.push(record);
        // Just pushed, so the index is valid.
        &self.records[self.records.len() - 1]
    }

    /// Counts a malformed entry that was skipped during ingestion.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// All records, in sequence order
    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    /// Number of malformed entries skipped while building this session
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Number of ingested records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were ingested
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for IngestSession {
    fn default() -> Self {
        Self::new()
    }
}
