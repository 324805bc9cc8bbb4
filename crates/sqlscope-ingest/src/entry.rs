//! Raw log entries - the wire model for query-log input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlscope_core::{Result, SqlscopeError};

/// One entry as it appears in the log, before validation.
///
/// Every field is optional at the wire level so that a partially written or
/// truncated log line still deserializes; [`RawLogEntry::validate`] reports
/// what is missing so the ingestor can skip and count it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLogEntry {
    /// When the statement was executed
    pub timestamp: Option<DateTime<Utc>>,
    /// The raw SQL text
    pub statement: Option<String>,
    /// Rows returned or affected
    pub row_count: Option<u64>,
    /// Execution duration in milliseconds
    pub duration_ms: Option<f64>,
}

impl RawLogEntry {
    /// Creates a fully populated entry
    pub fn new(
        timestamp: DateTime<Utc>,
        statement: impl Into<String>,
        row_count: u64,
        duration_ms: f64,
    ) -> Self {
        Self {
            timestamp: Some(timestamp),
            statement: Some(statement.into()),
            row_count: Some(row_count),
            duration_ms: Some(duration_ms),
        }
    }

    /// Names the required fields this entry is missing.
    ///
    /// A present but empty/whitespace statement counts as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.timestamp.is_none() {
            missing.push("timestamp");
        }
        match &self.statement {
            Some(s) if !s.trim().is_empty() => {}
            _ => missing.push("statement"),
        }
        if self.row_count.is_none() {
            missing.push("row_count");
        }
        if self.duration_ms.is_none() {
            missing.push("duration_ms");
        }
        missing
    }

    /// Validates the entry, returning its fields with the options peeled off.
    pub fn validate(self) -> Result<ValidatedEntry> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(SqlscopeError::MalformedRecord(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        // missing_fields() checked every option above.
        let Self {
            timestamp: Some(timestamp),
            statement: Some(statement),
            row_count: Some(row_count),
            duration_ms: Some(duration_ms),
        } = self
        else {
            return Err(SqlscopeError::MalformedRecord(
                "missing required field(s)".to_string(),
            ));
        };
        Ok(ValidatedEntry {
            timestamp,
            statement,
            row_count,
            duration_ms,
        })
    }
}

/// A log entry that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub timestamp: DateTime<Utc>,
    pub statement: String,
    pub row_count: u64,
    pub duration_ms: f64,
}
