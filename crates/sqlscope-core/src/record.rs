//! Query records - one executed statement from a log

use crate::normalize::StatementShape;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Class of SQL statement, taken from the leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    /// Classifies a statement by its leading keyword.
    ///
    /// `WITH ... SELECT` counts as a SELECT; anything unrecognized is
    /// `Other`.
    pub fn classify(sql: &str) -> Self {
        let first_word = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");

        if first_word.eq_ignore_ascii_case("select") || first_word.eq_ignore_ascii_case("with") {
            Self::Select
        } else if first_word.eq_ignore_ascii_case("insert") {
            Self::Insert
        } else if first_word.eq_ignore_ascii_case("update") {
            Self::Update
        } else if first_word.eq_ignore_ascii_case("delete") {
            Self::Delete
        } else {
            Self::Other
        }
    }

    /// Returns the kind as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Other => "other",
        }
    }

    /// Returns true for read-only statements
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Select)
    }
}

/// A single executed statement from the query log.
///
/// Records are immutable once created. The owning [`IngestSession`] assigns
/// the sequence number; there is no public constructor.
///
/// [`IngestSession`]: crate::session::IngestSession
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Position within the ingestion session (dense, starting at 0)
    pub sequence_number: u64,
    /// Normalized statement shape (literals replaced by placeholders)
    pub shape: StatementShape,
    /// The statement exactly as it appeared in the log
    pub raw_statement: String,
    /// Statement class from the leading keyword
    pub kind: StatementKind,
    /// Rows returned or affected
    pub row_count: u64,
    /// Execution duration in milliseconds
    pub duration_ms: f64,
    /// When the statement was executed
    pub timestamp: DateTime<Utc>,
}

impl QueryRecord {
    pub(crate) fn new(
        sequence_number: u64,
        raw_statement: String,
        row_count: u64,
        duration_ms: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let shape = StatementShape::normalize(&raw_statement);
        let kind = StatementKind::classify(&raw_statement);
        Self {
            sequence_number,
            shape,
            raw_statement,
            kind,
            row_count,
            duration_ms,
            timestamp,
        }
    }
}
